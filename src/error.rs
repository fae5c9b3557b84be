use std::fmt::Display;

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Movie service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse failure classes shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service could not be reached or did not answer successfully
    Network,
    /// The service answered with a body we could not understand
    Decode,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network failure"),
            FailureKind::Decode => write!(f, "unreadable response"),
        }
    }
}

impl ClientError {
    /// Maps the error onto the failure class the UI distinguishes
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::HttpClient(e) if e.is_decode() => FailureKind::Decode,
            ClientError::Decode(_) => FailureKind::Decode,
            ClientError::HttpClient(_) | ClientError::Status { .. } | ClientError::InvalidInput(_) => {
                FailureKind::Network
            }
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_kind() {
        let err: ClientError = serde_json::from_str::<Vec<u32>>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), FailureKind::Decode);
        assert!(err.to_string().starts_with("Malformed response body"));
    }

    #[test]
    fn test_status_error_kind() {
        let err = ClientError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Network);
        assert_eq!(
            err.to_string(),
            "Movie service returned status 503: unavailable"
        );
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Network.to_string(), "network failure");
        assert_eq!(FailureKind::Decode.to_string(), "unreadable response");
    }
}
