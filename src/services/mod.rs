pub mod catalog;
pub mod orchestrator;
pub mod providers;
pub mod query;
pub mod recommendations;

pub use catalog::{CatalogCache, CatalogStatus};
pub use orchestrator::{Completion, Pending, RequestOrchestrator, RequestToken, Settled, Surface};
pub use providers::{HttpMovieService, MovieService, SharedMovieService};
pub use query::{QueryController, ResultOrigin, SearchMode, SearchState};
pub use recommendations::RecommendationState;
