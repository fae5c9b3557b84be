use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier for a catalog entry
///
/// Opaque to the client: the service may send any JSON number or a string,
/// and the value is only ever compared and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(serde_json::Number),
    Text(String),
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Numeric(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId::Numeric(id.into())
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        MovieId::Text(id.to_string())
    }
}

/// A movie as returned by any of the service endpoints
///
/// `id` and `title` are required everywhere; the listing endpoint omits
/// `poster` and `description`, which the recommendation view shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Movie {
    /// Creates a movie with a numeric id and only the mandatory fields set
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: MovieId::from(id),
            title: title.into(),
            genre: None,
            rating: None,
            poster: None,
            description: None,
        }
    }

    /// Case-insensitive substring match against the title
    ///
    /// `needle` must already be lowercased.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServiceInfo {
    pub message: String,
}
