//! Render model: exactly what the user can see at one instant

use crate::{
    error::FailureKind,
    models::Movie,
    services::{
        catalog::{CatalogCache, CatalogStatus},
        orchestrator::Surface,
        query::{ResultOrigin, SearchState},
    },
};

/// Transient, dismissible error indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub surface: Surface,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    Browse(BrowseScreen<'a>),
    Recommend(RecommendScreen<'a>),
}

#[derive(Debug, PartialEq)]
pub struct BrowseScreen<'a> {
    pub query: &'a str,
    /// A remote search is in flight
    pub searching: bool,
    /// A catalog (re)load is in flight
    pub refreshing: bool,
    pub content: BrowseContent<'a>,
    pub notice: Option<&'a Notice>,
}

#[derive(Debug, PartialEq)]
pub enum BrowseContent<'a> {
    LoadingCatalog,
    /// Persistent: the catalog never loaded
    CatalogUnavailable(FailureKind),
    /// The catalog loaded but is empty
    EmptyCatalog,
    /// A well-formed answer with zero matches
    NoResults { query: &'a str },
    Results(&'a [Movie]),
}

#[derive(Debug, PartialEq)]
pub struct RecommendScreen<'a> {
    pub selected: &'a Movie,
    pub loading: bool,
    pub recommendations: &'a [Movie],
    pub notice: Option<&'a Notice>,
}

impl<'a> BrowseContent<'a> {
    pub fn from_state(state: &'a SearchState, catalog: &CatalogCache) -> Self {
        if !state.result_set.is_empty() {
            return BrowseContent::Results(&state.result_set);
        }

        match &state.origin {
            ResultOrigin::Remote { query } => BrowseContent::NoResults {
                query: query.as_str(),
            },
            ResultOrigin::Filter { query } if catalog.status() == CatalogStatus::Loaded => {
                BrowseContent::NoResults {
                    query: query.as_str(),
                }
            }
            ResultOrigin::Catalog | ResultOrigin::Filter { .. } => match catalog.status() {
                CatalogStatus::NotLoaded => BrowseContent::LoadingCatalog,
                CatalogStatus::Unavailable(kind) => BrowseContent::CatalogUnavailable(kind),
                CatalogStatus::Loaded => BrowseContent::EmptyCatalog,
            },
        }
    }
}

impl Screen<'_> {
    pub fn is_browse(&self) -> bool {
        matches!(self, Screen::Browse(_))
    }

    /// Movies shown in the grid, in display order
    pub fn grid(&self) -> &[Movie] {
        match self {
            Screen::Browse(browse) => match browse.content {
                BrowseContent::Results(movies) => movies,
                _ => &[],
            },
            Screen::Recommend(recommend) => recommend.recommendations,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Screen::Browse(browse) => browse.notice,
            Screen::Recommend(recommend) => recommend.notice,
        }
    }
}
