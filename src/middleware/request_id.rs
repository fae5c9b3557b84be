use reqwest::RequestBuilder;
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outbound call to the movie service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stamps the request ID onto an outgoing request
pub fn with_request_id(builder: RequestBuilder, request_id: &RequestId) -> RequestBuilder {
    builder.header(REQUEST_ID_HEADER, request_id.as_str())
}

/// Creates the tracing span an outbound call runs in
pub fn make_span_with_request_id(request_id: &RequestId, method: &str, url: &str) -> tracing::Span {
    tracing::info_span!(
        "movie_service_request",
        method = %method,
        url = %url,
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_header_is_attached() {
        let request_id = RequestId::new();
        let request = with_request_id(
            reqwest::Client::new().get("http://movies.local/movies"),
            &request_id,
        )
        .build()
        .unwrap();

        let header = request.headers().get(REQUEST_ID_HEADER).unwrap();
        assert_eq!(header.to_str().unwrap(), request_id.as_str());
        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }
}
