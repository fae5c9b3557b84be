//! Query controller: owns the search text, the visible result set and the
//! catalog cache it falls back to.

use crate::{
    config::SearchVariant,
    error::ClientResult,
    models::Movie,
    services::{
        catalog::CatalogCache,
        orchestrator::{Pending, RequestOrchestrator, Surface},
        providers::SharedMovieService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Idle,
    /// A non-empty local filter is applied
    Filtering,
    /// A remote search is in flight
    RemoteSearching,
}

/// Operation that produced the visible result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOrigin {
    Catalog,
    Filter { query: String },
    Remote { query: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query_text: String,
    pub mode: SearchMode,
    pub result_set: Vec<Movie>,
    pub origin: ResultOrigin,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            mode: SearchMode::Idle,
            result_set: Vec::new(),
            origin: ResultOrigin::Catalog,
        }
    }
}

#[derive(Debug)]
pub struct QueryController {
    variant: SearchVariant,
    catalog: CatalogCache,
    state: SearchState,
    /// Trimmed text of the search currently in flight
    pending_query: Option<String>,
}

impl QueryController {
    pub fn new(variant: SearchVariant) -> Self {
        Self {
            variant,
            catalog: CatalogCache::new(),
            state: SearchState::default(),
            pending_query: None,
        }
    }

    pub fn variant(&self) -> SearchVariant {
        self.variant
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    /// Issues the initial catalog load
    pub fn start(
        &mut self,
        orchestrator: &mut RequestOrchestrator,
        service: &SharedMovieService,
    ) -> Pending<Vec<Movie>> {
        self.catalog.load(orchestrator, service)
    }

    /// Records a keystroke
    ///
    /// With live filtering the result set follows the text immediately. With
    /// remote search a search in flight for different text is abandoned, since
    /// its answer would no longer match the query box.
    pub fn on_text_change(&mut self, text: &str, orchestrator: &mut RequestOrchestrator) {
        self.state.query_text = text.to_string();

        match self.variant {
            SearchVariant::LiveFilter => self.refilter(),
            SearchVariant::RemoteSearch => {
                let trimmed = text.trim();
                if self.state.mode == SearchMode::RemoteSearching
                    && self.pending_query.as_deref() != Some(trimmed)
                {
                    self.abandon_search(orchestrator);
                }
            }
        }
    }

    /// Handles Enter in the query box
    ///
    /// Blank text resets to the cached catalog and reloads it. Otherwise the
    /// remote variant issues a search; the live variant has nothing to send.
    pub fn on_submit(
        &mut self,
        text: &str,
        orchestrator: &mut RequestOrchestrator,
        service: &SharedMovieService,
    ) -> Option<Pending<Vec<Movie>>> {
        self.state.query_text = text.to_string();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            self.abandon_search(orchestrator);
            self.show_catalog();
            tracing::debug!("Query cleared, reloading catalog");
            return Some(self.catalog.load(orchestrator, service));
        }

        match self.variant {
            SearchVariant::LiveFilter => {
                self.refilter();
                None
            }
            SearchVariant::RemoteSearch => {
                let query = trimmed.to_string();
                let service = service.clone();
                let request_query = query.clone();
                let pending = orchestrator.issue(Surface::Search, async move {
                    service.search(&request_query).await
                });

                tracing::info!(query = %query, seq = pending.token().seq, "Search submitted");
                self.state.mode = SearchMode::RemoteSearching;
                self.pending_query = Some(query);
                Some(pending)
            }
        }
    }

    /// Supersedes an in-flight search, if any
    pub fn abandon_search(&mut self, orchestrator: &mut RequestOrchestrator) {
        if orchestrator.is_in_flight(Surface::Search) {
            orchestrator.invalidate(Surface::Search);
        }
        if self.state.mode == SearchMode::RemoteSearching {
            self.state.mode = SearchMode::Idle;
        }
        self.pending_query = None;
    }

    /// Applies the winning catalog completion
    ///
    /// The visible result set is only refreshed when `refresh_visible` is set
    /// and no remote search owns it.
    pub fn apply_catalog(
        &mut self,
        result: ClientResult<Vec<Movie>>,
        refresh_visible: bool,
    ) -> ClientResult<()> {
        match result {
            Ok(movies) => {
                self.catalog.store(movies);
                if refresh_visible && !self.search_active() {
                    match self.variant {
                        SearchVariant::LiveFilter => self.refilter(),
                        SearchVariant::RemoteSearch => self.show_catalog(),
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.catalog.mark_failed(&e);
                Err(e)
            }
        }
    }

    /// Applies the winning search completion
    ///
    /// On failure the previous result set stays visible.
    pub fn apply_search(&mut self, result: ClientResult<Vec<Movie>>) -> ClientResult<()> {
        let query = self
            .pending_query
            .take()
            .unwrap_or_else(|| self.state.query_text.trim().to_string());
        self.state.mode = SearchMode::Idle;

        let movies = result?;
        tracing::debug!(query = %query, results = movies.len(), "Search results applied");
        self.state.result_set = movies;
        self.state.origin = ResultOrigin::Remote { query };
        Ok(())
    }

    fn search_active(&self) -> bool {
        self.state.mode == SearchMode::RemoteSearching
            || (matches!(self.state.origin, ResultOrigin::Remote { .. })
                && !self.state.query_text.trim().is_empty())
    }

    fn show_catalog(&mut self) {
        self.state.result_set = self.catalog.movies().to_vec();
        self.state.mode = SearchMode::Idle;
        self.state.origin = ResultOrigin::Catalog;
    }

    fn refilter(&mut self) {
        let trimmed = self.state.query_text.trim();
        if trimmed.is_empty() {
            self.show_catalog();
            return;
        }

        self.state.result_set = self.catalog.filter(trimmed);
        self.state.mode = SearchMode::Filtering;
        self.state.origin = ResultOrigin::Filter {
            query: trimmed.to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::services::catalog::CatalogStatus;
    use crate::services::orchestrator::Settled;
    use crate::services::providers::MockMovieService;
    use std::sync::Arc;

    fn catalog_movies() -> Vec<Movie> {
        vec![Movie::new(1, "Inception"), Movie::new(2, "Up")]
    }

    fn mock_service() -> SharedMovieService {
        let mut mock = MockMovieService::new();
        mock.expect_list_movies()
            .returning(|| Ok(catalog_movies()));
        mock.expect_search().returning(|query| {
            Ok(vec![Movie::new(10, format!("{} result", query))])
        });
        Arc::new(mock)
    }

    async fn settle(
        controller: &mut QueryController,
        orchestrator: &mut RequestOrchestrator,
        pending: Pending<Vec<Movie>>,
    ) -> ClientResult<()> {
        let surface = pending.token().surface;
        let completion = pending.resolve().await;
        match orchestrator.settle(completion) {
            Settled::Current(result) => match surface {
                Surface::Catalog => controller.apply_catalog(result, true),
                Surface::Search => controller.apply_search(result),
                Surface::Recommend => unreachable!(),
            },
            Settled::Discarded => Ok(()),
        }
    }

    async fn loaded(variant: SearchVariant) -> (QueryController, RequestOrchestrator, SharedMovieService) {
        let service = mock_service();
        let mut orchestrator = RequestOrchestrator::new();
        let mut controller = QueryController::new(variant);
        let pending = controller.start(&mut orchestrator, &service);
        settle(&mut controller, &mut orchestrator, pending)
            .await
            .unwrap();
        (controller, orchestrator, service)
    }

    fn ids(movies: &[Movie]) -> Vec<String> {
        movies.iter().map(|m| m.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_catalog_load_fills_result_set() {
        let (controller, _, _) = loaded(SearchVariant::LiveFilter).await;
        assert_eq!(controller.catalog().status(), CatalogStatus::Loaded);
        assert_eq!(controller.state().result_set, catalog_movies());
        assert_eq!(controller.state().origin, ResultOrigin::Catalog);
    }

    #[tokio::test]
    async fn test_live_filter_and_clear() {
        let (mut controller, mut orchestrator, _) = loaded(SearchVariant::LiveFilter).await;

        controller.on_text_change("in", &mut orchestrator);
        assert_eq!(controller.state().query_text, "in");
        assert_eq!(controller.state().mode, SearchMode::Filtering);
        assert_eq!(ids(&controller.state().result_set), vec!["1"]);

        controller.on_text_change("", &mut orchestrator);
        assert_eq!(controller.state().mode, SearchMode::Idle);
        assert_eq!(ids(&controller.state().result_set), vec!["1", "2"]);
        assert!(!orchestrator.is_in_flight(Surface::Catalog));
    }

    #[tokio::test]
    async fn test_whitespace_text_is_empty() {
        let (mut controller, mut orchestrator, _) = loaded(SearchVariant::LiveFilter).await;
        controller.on_text_change("   ", &mut orchestrator);
        assert_eq!(controller.state().origin, ResultOrigin::Catalog);
        assert_eq!(controller.state().result_set.len(), 2);
    }

    #[tokio::test]
    async fn test_live_submit_does_not_issue_requests() {
        let (mut controller, mut orchestrator, service) = loaded(SearchVariant::LiveFilter).await;
        let pending = controller.on_submit("up", &mut orchestrator, &service);
        assert!(pending.is_none());
        assert_eq!(ids(&controller.state().result_set), vec!["2"]);
    }

    #[tokio::test]
    async fn test_remote_submit_applies_service_results() {
        let (mut controller, mut orchestrator, service) = loaded(SearchVariant::RemoteSearch).await;

        let pending = controller
            .on_submit("  space travel ", &mut orchestrator, &service)
            .unwrap();
        assert_eq!(controller.state().mode, SearchMode::RemoteSearching);
        assert_eq!(controller.state().result_set, catalog_movies());

        settle(&mut controller, &mut orchestrator, pending)
            .await
            .unwrap();
        assert_eq!(controller.state().mode, SearchMode::Idle);
        assert_eq!(
            controller.state().result_set[0].title,
            "space travel result"
        );
        assert_eq!(
            controller.state().origin,
            ResultOrigin::Remote {
                query: "space travel".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_blank_submit_resets_to_catalog() {
        let (mut controller, mut orchestrator, service) = loaded(SearchVariant::RemoteSearch).await;
        let pending = controller
            .on_submit("matrix", &mut orchestrator, &service)
            .unwrap();
        settle(&mut controller, &mut orchestrator, pending)
            .await
            .unwrap();

        let reload = controller
            .on_submit(" \t", &mut orchestrator, &service)
            .unwrap();
        assert_eq!(reload.token().surface, Surface::Catalog);
        assert_eq!(controller.state().result_set, catalog_movies());
        assert_eq!(controller.state().origin, ResultOrigin::Catalog);

        settle(&mut controller, &mut orchestrator, reload)
            .await
            .unwrap();
        assert_eq!(controller.state().result_set, catalog_movies());
    }

    #[tokio::test]
    async fn test_editing_text_abandons_search_in_flight() {
        let (mut controller, mut orchestrator, service) = loaded(SearchVariant::RemoteSearch).await;
        let pending = controller
            .on_submit("alien", &mut orchestrator, &service)
            .unwrap();

        controller.on_text_change("aliens", &mut orchestrator);
        assert_eq!(controller.state().mode, SearchMode::Idle);
        assert!(!orchestrator.is_in_flight(Surface::Search));

        settle(&mut controller, &mut orchestrator, pending)
            .await
            .unwrap();
        assert_eq!(controller.state().result_set, catalog_movies());
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_results() {
        let mut mock = MockMovieService::new();
        mock.expect_list_movies().returning(|| Ok(catalog_movies()));
        mock.expect_search().returning(|_| {
            Err(ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });
        let service: SharedMovieService = Arc::new(mock);

        let mut orchestrator = RequestOrchestrator::new();
        let mut controller = QueryController::new(SearchVariant::RemoteSearch);
        let pending = controller.start(&mut orchestrator, &service);
        settle(&mut controller, &mut orchestrator, pending)
            .await
            .unwrap();

        let pending = controller
            .on_submit("heist", &mut orchestrator, &service)
            .unwrap();
        let result = settle(&mut controller, &mut orchestrator, pending).await;

        assert!(result.is_err());
        assert_eq!(controller.state().mode, SearchMode::Idle);
        assert_eq!(controller.state().result_set, catalog_movies());
        assert!(!orchestrator.is_in_flight(Surface::Search));
    }

    #[tokio::test]
    async fn test_catalog_failure_leaves_cache_unavailable() {
        let mut mock = MockMovieService::new();
        mock.expect_list_movies().returning(|| {
            Err(ClientError::Status {
                status: 503,
                body: String::new(),
            })
        });
        let service: SharedMovieService = Arc::new(mock);

        let mut orchestrator = RequestOrchestrator::new();
        let mut controller = QueryController::new(SearchVariant::LiveFilter);
        let pending = controller.start(&mut orchestrator, &service);
        let result = settle(&mut controller, &mut orchestrator, pending).await;

        assert!(result.is_err());
        assert!(matches!(
            controller.catalog().status(),
            CatalogStatus::Unavailable(_)
        ));
        assert!(controller.state().result_set.is_empty());
    }
}
