//! Store state types.
//!
//! [`AuthState`] and [`CatalogState`] are plain data. They are mutated only by
//! the reducers in [`crate::app::handler`], one event at a time, and are read by
//! callers as snapshots from a [`StateCell`](crate::app::StateCell).
//!
//! # Catalog invariants
//!
//! - exactly one listing is authoritative: `search_results` when
//!   `search_active`, `entries` otherwise (see [`CatalogState::displayed`])
//! - a removed id disappears from both listings in the same commit
//! - `selected` is the latest completed get-by-id result and is not touched by
//!   list mutations
//!
//! # Example
//!
//! ```rust
//! use movieshelf::app::{CatalogState, ListingMode};
//!
//! let state = CatalogState::default();
//! assert_eq!(state.listing_mode(), ListingMode::Catalog);
//! assert!(state.displayed().is_empty());
//! ```

use super::modes::ListingMode;
use crate::domain::{ErrorValue, Movie, MovieId, Session};

/// Authentication state: the session token plus request lifecycle fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// Session token. `None` until the first successful login and after logout.
    pub token: Option<String>,

    /// True while a register or login request is in flight.
    pub loading: bool,

    /// Error of the most recently rejected register or login.
    pub error: Option<ErrorValue>,
}

impl AuthState {
    /// The session view of this state.
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            token: self.token.clone(),
        }
    }

    /// True when a non-empty token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Catalog state: both listings, the search flag, the selected movie, and
/// the shared lifecycle fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    /// Full catalog, in the order received (create and import add at the end).
    pub entries: Vec<Movie>,

    /// Most recent search result set.
    pub search_results: Vec<Movie>,

    /// Whether `search_results` is the authoritative listing.
    pub search_active: bool,

    /// Latest completed get-by-id result.
    pub selected: Option<Movie>,

    /// True while a tracked operation (fetch all, fetch by id, import) is in flight.
    pub loading: bool,

    /// Error of the most recently rejected operation.
    pub error: Option<ErrorValue>,

    /// Generation of the most recently issued search or clear.
    ///
    /// Only consulted under [`StalePolicy::Discard`](super::modes::StalePolicy::Discard).
    pub search_generation: u64,
}

impl CatalogState {
    /// Which listing is authoritative.
    #[must_use]
    pub const fn listing_mode(&self) -> ListingMode {
        if self.search_active {
            ListingMode::Search
        } else {
            ListingMode::Catalog
        }
    }

    /// The authoritative listing.
    #[must_use]
    pub fn displayed(&self) -> &[Movie] {
        match self.listing_mode() {
            ListingMode::Search => &self.search_results,
            ListingMode::Catalog => &self.entries,
        }
    }

    /// Looks up a movie by id in the full catalog.
    #[must_use]
    pub fn entry(&self, id: MovieId) -> Option<&Movie> {
        self.entries.iter().find(|movie| movie.id == id)
    }

    /// Removes every movie with `id` from both listings. Returns whether
    /// anything was removed.
    pub(crate) fn remove_everywhere(&mut self, id: MovieId) -> bool {
        let before = self.entries.len() + self.search_results.len();
        self.entries.retain(|movie| movie.id != id);
        self.search_results.retain(|movie| movie.id != id);
        before != self.entries.len() + self.search_results.len()
    }
}
