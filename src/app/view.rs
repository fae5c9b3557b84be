use crate::{
    error::ClientResult,
    models::Movie,
    services::{
        orchestrator::{Pending, RequestOrchestrator, Surface},
        providers::SharedMovieService,
        recommendations::RecommendationState,
    },
};

/// Two-mode screen controller
///
/// Browsing shows the search result set; Recommending carries its own
/// drill-down state and hides every search affordance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Browsing,
    Recommending(RecommendationState),
}

impl View {
    pub fn is_browsing(&self) -> bool {
        matches!(self, View::Browsing)
    }

    pub fn recommendation(&self) -> Option<&RecommendationState> {
        match self {
            View::Browsing => None,
            View::Recommending(state) => Some(state),
        }
    }

    /// Browsing → Recommending
    ///
    /// Returns `None` when already recommending.
    pub fn select(
        &mut self,
        movie: Movie,
        orchestrator: &mut RequestOrchestrator,
        service: &SharedMovieService,
    ) -> Option<Pending<Vec<Movie>>> {
        if !self.is_browsing() {
            tracing::debug!(title = %movie.title, "Selection ignored while recommending");
            return None;
        }

        let state = RecommendationState::new(movie);
        let pending = state.request(orchestrator, service);
        *self = View::Recommending(state);
        Some(pending)
    }

    /// Recommending → Browsing
    ///
    /// Drops the drill-down state and supersedes its request. Returns whether
    /// a transition happened.
    pub fn back(&mut self, orchestrator: &mut RequestOrchestrator) -> bool {
        if self.is_browsing() {
            return false;
        }

        orchestrator.invalidate(Surface::Recommend);
        *self = View::Browsing;
        true
    }

    pub fn apply_recommendations(&mut self, result: ClientResult<Vec<Movie>>) -> ClientResult<()> {
        match self {
            View::Recommending(state) => state.resolve(result),
            View::Browsing => {
                tracing::warn!("Recommendations arrived while browsing, ignoring");
                Ok(())
            }
        }
    }
}
