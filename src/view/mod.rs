//! View-model builders. Each one fans out to the catalog, absorbs failures of
//! secondary resources into their defaults, and fails only when the resource
//! the page is about cannot be fetched.

use tracing::warn;

mod detail;
mod listing;
pub mod page;
pub(crate) mod text;
mod watch;

pub use detail::{build_media_view, MediaView};
pub use listing::{
    build_category_view, build_genre_view, build_home_view, build_search_view, CategoryView,
    GenreView, HomeView, SearchView, UNKNOWN_GENRE,
};
pub use watch::{build_watch_view, EmbedTemplate, StreamOption, WatchView};

/// The only fatal outcome of a view build; surfaces as a 404.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} not found")]
pub struct NotFound(pub String);

impl NotFound {
    pub fn new(what: impl Into<String>) -> Self {
        Self(what.into())
    }
}

/// Substitutes the default for a failed secondary fetch.
fn or_default<T: Default>(result: anyhow::Result<T>, resource: &str, subject: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Using empty {} for {}: {:#}", resource, subject, e);
            T::default()
        }
    }
}
