//! View models computed from catalog state.
//!
//! View models hold display-ready data only. They are built from a
//! [`CatalogState`] snapshot or a [`Movie`] and consumed by the
//! [`renderer`](super::renderer).
//!
//! # Example
//!
//! ```rust
//! use movieshelf::app::CatalogState;
//! use movieshelf::ui::CatalogView;
//!
//! let view = CatalogView::from_state(&CatalogState::default());
//! assert_eq!(view.heading, "Movies List");
//! assert_eq!(view.empty_message.as_deref(), Some("No movies found."));
//! ```

use crate::app::{CatalogState, ListingMode};
use crate::domain::{Movie, MovieId};

pub const CATALOG_HEADING: &str = "Movies List";
pub const SEARCH_HEADING: &str = "Search Results";
pub const EMPTY_LISTING: &str = "No movies found.";
pub const NO_ACTORS: &str = "No actors available";

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub format: String,
}

impl From<&Movie> for MovieRow {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            format: movie.format.to_string(),
        }
    }
}

/// The listing surface.
///
/// Rows come from whichever listing is authoritative and are sorted by title,
/// ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub heading: &'static str,
    pub mode: ListingMode,
    pub rows: Vec<MovieRow>,

    /// Set when `rows` is empty.
    pub empty_message: Option<&'static str>,

    pub loading: bool,

    /// User-facing text of the stored error, if any.
    pub error: Option<String>,
}

impl CatalogView {
    #[must_use]
    pub fn from_state(state: &CatalogState) -> Self {
        let mode = state.listing_mode();
        let heading = match mode {
            ListingMode::Search => SEARCH_HEADING,
            ListingMode::Catalog => CATALOG_HEADING,
        };

        let mut rows: Vec<MovieRow> = state.displayed().iter().map(MovieRow::from).collect();
        rows.sort_by_cached_key(|row| row.title.to_lowercase());

        let empty_message = rows.is_empty().then_some(EMPTY_LISTING);

        Self {
            heading,
            mode,
            rows,
            empty_message,
            loading: state.loading,
            error: state.error.as_ref().map(|error| error.user_message()),
        }
    }
}

/// Detail view of one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailView {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub format: String,

    /// Actor names joined with `", "`, or a placeholder when there are none.
    pub actors: String,
}

impl MovieDetailView {
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        let names: Vec<&str> = movie.actor_names().collect();
        let actors = if names.is_empty() {
            NO_ACTORS.to_string()
        } else {
            names.join(", ")
        };

        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            format: movie.format.to_string(),
            actors,
        }
    }
}
