use std::fmt::Write;

use crate::{
    app::screen::{BrowseContent, BrowseScreen, Notice, RecommendScreen, Screen},
    models::Movie,
};

/// Renders the screen model as plain text
pub fn render(screen: &Screen<'_>) -> String {
    let mut out = String::new();
    match screen {
        Screen::Browse(browse) => render_browse(&mut out, browse),
        Screen::Recommend(recommend) => render_recommend(&mut out, recommend),
    }
    out
}

fn render_browse(out: &mut String, screen: &BrowseScreen<'_>) {
    let _ = writeln!(out, "Search: {}", screen.query);
    if screen.searching {
        let _ = writeln!(out, "  searching...");
    } else if screen.refreshing && !matches!(screen.content, BrowseContent::LoadingCatalog) {
        let _ = writeln!(out, "  refreshing catalog...");
    }
    render_notice(out, screen.notice);

    match &screen.content {
        BrowseContent::LoadingCatalog => {
            let _ = writeln!(out, "Loading catalog...");
        }
        BrowseContent::CatalogUnavailable(kind) => {
            let _ = writeln!(out, "Can't load the catalog ({}). Press Enter to retry.", kind);
        }
        BrowseContent::EmptyCatalog => {
            let _ = writeln!(out, "The catalog is empty.");
        }
        BrowseContent::NoResults { query } => {
            let _ = writeln!(out, "No results for \"{}\".", query);
        }
        BrowseContent::Results(movies) => render_grid(out, movies),
    }
}

fn render_recommend(out: &mut String, screen: &RecommendScreen<'_>) {
    let selected = screen.selected;
    let _ = writeln!(out, "Because you picked: {}", summary(selected));
    if let Some(description) = &selected.description {
        let _ = writeln!(out, "  {}", description);
    }
    if let Some(poster) = &selected.poster {
        let _ = writeln!(out, "  poster: {}", poster);
    }
    render_notice(out, screen.notice);

    if screen.loading {
        let _ = writeln!(out, "Finding similar titles...");
    } else if screen.recommendations.is_empty() {
        let _ = writeln!(out, "No similar titles found.");
    } else {
        let _ = writeln!(out, "Similar titles:");
        render_grid(out, screen.recommendations);
    }
    let _ = writeln!(out, "(:back to return)");
}

fn render_notice(out: &mut String, notice: Option<&Notice>) {
    if let Some(notice) = notice {
        let _ = writeln!(out, "! {} (:dismiss)", notice.message);
    }
}

fn render_grid(out: &mut String, movies: &[Movie]) {
    for (position, movie) in movies.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", position + 1, summary(movie));
    }
}

fn summary(movie: &Movie) -> String {
    let mut line = movie.title.clone();
    if let Some(genre) = &movie.genre {
        let _ = write!(line, " [{}]", genre);
    }
    if let Some(rating) = movie.rating {
        let _ = write!(line, " *{:.1}", rating);
    }
    line
}
