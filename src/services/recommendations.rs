use crate::{
    error::ClientResult,
    models::Movie,
    services::{
        orchestrator::{Pending, RequestOrchestrator, Surface},
        providers::SharedMovieService,
    },
};

/// Ephemeral drill-down state for one selected movie
///
/// Created on selection and dropped on back-navigation; nothing is cached
/// between selections.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationState {
    selected: Movie,
    recommendations: Vec<Movie>,
    loading: bool,
}

impl RecommendationState {
    pub fn new(selected: Movie) -> Self {
        Self {
            selected,
            recommendations: Vec::new(),
            loading: true,
        }
    }

    /// Issues the recommend request for the selected movie
    pub fn request(
        &self,
        orchestrator: &mut RequestOrchestrator,
        service: &SharedMovieService,
    ) -> Pending<Vec<Movie>> {
        let service = service.clone();
        let movie = self.selected.clone();

        tracing::info!(movie_id = %movie.id, title = %movie.title, "Fetching recommendations");
        orchestrator.issue(Surface::Recommend, async move {
            service.recommend(&movie).await
        })
    }

    /// Applies the winning recommend completion
    ///
    /// `loading` clears in every outcome.
    pub fn resolve(&mut self, result: ClientResult<Vec<Movie>>) -> ClientResult<()> {
        self.loading = false;
        self.recommendations = result?;
        Ok(())
    }

    pub fn selected(&self) -> &Movie {
        &self.selected
    }

    pub fn recommendations(&self) -> &[Movie] {
        &self.recommendations
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_new_state_is_loading() {
        let state = RecommendationState::new(Movie::new(1, "Inception"));
        assert!(state.is_loading());
        assert!(state.recommendations().is_empty());
        assert_eq!(state.selected().title, "Inception");
    }

    #[test]
    fn test_resolve_success() {
        let mut state = RecommendationState::new(Movie::new(1, "Inception"));
        state
            .resolve(Ok(vec![Movie::new(3, "Interstellar")]))
            .unwrap();

        assert!(!state.is_loading());
        assert_eq!(state.recommendations()[0].title, "Interstellar");
    }

    #[test]
    fn test_resolve_failure_clears_loading() {
        let mut state = RecommendationState::new(Movie::new(1, "Inception"));
        let result = state.resolve(Err(ClientError::InvalidInput("nope".to_string())));

        assert!(result.is_err());
        assert!(!state.is_loading());
        assert!(state.recommendations().is_empty());
    }
}
