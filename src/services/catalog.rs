use crate::{
    error::{ClientError, FailureKind},
    models::Movie,
    services::{
        orchestrator::{Pending, RequestOrchestrator, Surface},
        providers::SharedMovieService,
    },
};

/// Load status of the catalog cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// No listing has arrived yet
    NotLoaded,
    Loaded,
    /// The first load failed; nothing is cached
    Unavailable(FailureKind),
}

/// Last full, unfiltered listing fetched from the service
#[derive(Debug, Clone)]
pub struct CatalogCache {
    movies: Vec<Movie>,
    status: CatalogStatus,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            status: CatalogStatus::NotLoaded,
        }
    }

    /// Issues the catalog request on the catalog surface
    pub fn load(
        &self,
        orchestrator: &mut RequestOrchestrator,
        service: &SharedMovieService,
    ) -> Pending<Vec<Movie>> {
        let service = service.clone();
        orchestrator.issue(Surface::Catalog, async move { service.list_movies().await })
    }

    /// Replaces the cached listing
    pub fn store(&mut self, movies: Vec<Movie>) {
        tracing::debug!(movies = movies.len(), "Catalog cached");
        self.movies = movies;
        self.status = CatalogStatus::Loaded;
    }

    /// Records a failed load
    ///
    /// A cache that already holds a listing keeps it. Returns `true` when the
    /// failure left the cache unavailable.
    pub fn mark_failed(&mut self, error: &ClientError) -> bool {
        if self.status == CatalogStatus::Loaded {
            tracing::warn!(error = %error, "Catalog reload failed, keeping cached listing");
            return false;
        }

        tracing::error!(error = %error, "Catalog could not be loaded");
        self.movies.clear();
        self.status = CatalogStatus::Unavailable(error.kind());
        true
    }

    /// Case-insensitive substring filter on titles, in catalog order
    ///
    /// Whitespace-only text matches everything.
    pub fn filter(&self, text: &str) -> Vec<Movie> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.movies.clone();
        }

        self.movies
            .iter()
            .filter(|movie| movie.title_contains(&needle))
            .cloned()
            .collect()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }
}
