/// Movie service abstraction
///
/// The service that matches, ranks and recommends movies is an external
/// collaborator. The client only sees it through this trait, so the HTTP
/// implementation can be swapped for a mock in tests.
use std::sync::Arc;

use crate::{
    error::ClientResult,
    models::{Movie, ServiceInfo},
};

pub mod http;

pub use http::HttpMovieService;

/// Trait for movie data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Fetch the full, unfiltered catalog in service order
    async fn list_movies(&self) -> ClientResult<Vec<Movie>>;

    /// Resolve free-form text into a ranked list of movies
    ///
    /// Implementations reject an empty query; callers reset to the catalog
    /// instead of searching for nothing.
    async fn search(&self, query: &str) -> ClientResult<Vec<Movie>>;

    /// Fetch titles similar to `movie`, in service order
    async fn recommend(&self, movie: &Movie) -> ClientResult<Vec<Movie>>;

    /// Probe the service root
    async fn health(&self) -> ClientResult<ServiceInfo>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

pub type SharedMovieService = Arc<dyn MovieService>;
