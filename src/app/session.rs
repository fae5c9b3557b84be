use crate::{
    app::{
        screen::{BrowseContent, BrowseScreen, Notice, RecommendScreen, Screen},
        view::View,
    },
    config::SearchVariant,
    error::ClientError,
    models::Movie,
    services::{
        catalog::{CatalogCache, CatalogStatus},
        orchestrator::{Completion, Pending, RequestOrchestrator, Settled, Surface},
        providers::SharedMovieService,
        query::{QueryController, SearchState},
    },
};

/// One interactive session against the movie service
///
/// Every method is synchronous. Methods that need the network return a
/// [`Pending`] request; the caller resolves it whenever it likes and feeds
/// the [`Completion`] back through [`Session::apply`], which drops anything
/// that has been superseded in the meantime.
pub struct Session {
    service: SharedMovieService,
    orchestrator: RequestOrchestrator,
    query: QueryController,
    view: View,
    notice: Option<Notice>,
}

impl Session {
    pub fn new(service: SharedMovieService, variant: SearchVariant) -> Self {
        Self {
            service,
            orchestrator: RequestOrchestrator::new(),
            query: QueryController::new(variant),
            view: View::Browsing,
            notice: None,
        }
    }

    /// Issues the startup catalog load
    pub fn start(&mut self) -> Pending<Vec<Movie>> {
        tracing::info!(variant = ?self.query.variant(), "Session started");
        self.query.start(&mut self.orchestrator, &self.service)
    }

    /// Keystroke in the query box; ignored while recommending
    pub fn type_text(&mut self, text: &str) {
        if !self.view.is_browsing() {
            return;
        }
        self.query.on_text_change(text, &mut self.orchestrator);
    }

    /// Enter in the query box; ignored while recommending
    pub fn submit(&mut self, text: &str) -> Option<Pending<Vec<Movie>>> {
        if !self.view.is_browsing() {
            return None;
        }
        self.clear_notice(|surface| surface == Surface::Search);
        self.query
            .on_submit(text, &mut self.orchestrator, &self.service)
    }

    /// Drills into the visible movie at `index` (0-based)
    pub fn select(&mut self, index: usize) -> Option<Pending<Vec<Movie>>> {
        if !self.view.is_browsing() {
            return None;
        }
        let movie = self.query.state().result_set.get(index)?.clone();
        self.select_movie(movie)
    }

    /// Drills into `movie`
    ///
    /// A search still in flight is abandoned so that the result set preserved
    /// for back-navigation cannot change while hidden.
    pub fn select_movie(&mut self, movie: Movie) -> Option<Pending<Vec<Movie>>> {
        if !self.view.is_browsing() {
            return None;
        }
        self.query.abandon_search(&mut self.orchestrator);
        self.clear_notice(|surface| surface != Surface::Recommend);
        self.view
            .select(movie, &mut self.orchestrator, &self.service)
    }

    /// Returns to browsing; the search state is exactly as it was before
    pub fn back(&mut self) -> bool {
        let moved = self.view.back(&mut self.orchestrator);
        if moved {
            self.clear_notice(|surface| surface == Surface::Recommend);
        }
        moved
    }

    /// Applies a resolved request if it is still the latest on its surface
    pub fn apply(&mut self, completion: Completion<Vec<Movie>>) {
        let surface = completion.token.surface;
        let result = match self.orchestrator.settle(completion) {
            Settled::Current(result) => result,
            Settled::Discarded => return,
        };

        let outcome = match surface {
            Surface::Catalog => {
                let refresh_visible = self.view.is_browsing();
                self.query.apply_catalog(result, refresh_visible)
            }
            Surface::Search => self.query.apply_search(result),
            Surface::Recommend => self.view.apply_recommendations(result),
        };

        match outcome {
            Ok(()) => self.clear_notice(|notice_surface| notice_surface == surface),
            Err(error) => {
                // An unloadable catalog is reported by the screen itself.
                let persistent = surface == Surface::Catalog
                    && matches!(self.query.catalog().status(), CatalogStatus::Unavailable(_));
                if !persistent {
                    self.raise(surface, &error);
                }
            }
        }
    }

    /// Drops the current notice if it belongs to a surface matching `predicate`
    fn clear_notice(&mut self, predicate: impl Fn(Surface) -> bool) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| predicate(notice.surface))
        {
            self.notice = None;
        }
    }

    /// The notice belonging to whichever screen is showing
    fn visible_notice(&self) -> Option<&Notice> {
        let browsing = self.view.is_browsing();
        self.notice
            .as_ref()
            .filter(|notice| (notice.surface == Surface::Recommend) != browsing)
    }

    fn raise(&mut self, surface: Surface, error: &ClientError) {
        let message = match surface {
            Surface::Catalog => "Couldn't refresh the catalog".to_string(),
            Surface::Search => format!("Search failed: {}", error),
            Surface::Recommend => format!("Couldn't load recommendations: {}", error),
        };
        self.notice = Some(Notice {
            surface,
            kind: error.kind(),
            message,
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn search_state(&self) -> &SearchState {
        self.query.state()
    }

    pub fn catalog(&self) -> &CatalogCache {
        self.query.catalog()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_in_flight(&self, surface: Surface) -> bool {
        self.orchestrator.is_in_flight(surface)
    }

    /// Builds the render model for the current state
    pub fn screen(&self) -> Screen<'_> {
        match &self.view {
            View::Browsing => {
                let state = self.query.state();
                Screen::Browse(BrowseScreen {
                    query: &state.query_text,
                    searching: self.orchestrator.is_in_flight(Surface::Search),
                    refreshing: self.orchestrator.is_in_flight(Surface::Catalog),
                    content: BrowseContent::from_state(state, self.query.catalog()),
                    notice: self.visible_notice(),
                })
            }
            View::Recommending(state) => Screen::Recommend(RecommendScreen {
                selected: state.selected(),
                loading: state.is_loading(),
                recommendations: state.recommendations(),
                notice: self.visible_notice(),
            }),
        }
    }
}
