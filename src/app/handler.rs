//! Event handling and state transition logic.
//!
//! Every remote operation moves through `pending → fulfilled | rejected`, and
//! each of those steps is an event. The reducers here apply one event to one
//! state; they do no I/O and have no clock, so every transition can be tested
//! by constructing a state and an event.
//!
//! Both reducers return whether the change is visible to subscribers. A
//! `false` return may still have mutated bookkeeping (the search generation),
//! but nothing a subscriber renders.
//!
//! # Tracked and untracked operations
//!
//! Register, login, fetch all, fetch by id and import set `loading` on pending
//! and clear it on settle. Create, remove and the searches have no pending
//! step; they only write `error` when rejected.
//!
//! # Example
//!
//! ```rust
//! use movieshelf::app::{reduce_catalog, CatalogEvent, CatalogPolicy, CatalogState};
//!
//! let mut state = CatalogState::default();
//! reduce_catalog(&mut state, CatalogEvent::FetchAllPending, &CatalogPolicy::default());
//! assert!(state.loading);
//! ```

use super::modes::{CatalogPolicy, ImportMerge, StalePolicy};
use super::state::{AuthState, CatalogState};
use crate::domain::{Account, ErrorValue, Movie, MovieId};

/// Authentication lifecycle events.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    RegisterPending,
    /// The account is returned to the caller; state keeps nothing of it.
    RegisterFulfilled(Account),
    RegisterRejected(ErrorValue),

    LoginPending,
    LoginFulfilled { token: String },
    LoginRejected(ErrorValue),

    /// Local only. Clears the token and any auth error.
    Logout,
}

/// Catalog lifecycle events.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    FetchAllPending,
    FetchAllFulfilled(Vec<Movie>),
    FetchAllRejected(ErrorValue),

    FetchByIdPending,
    /// `None` when the payload did not decode.
    FetchByIdFulfilled(Option<Movie>),
    FetchByIdRejected(ErrorValue),

    /// `None` when the response was incomplete and must be dropped.
    CreateFulfilled(Option<Movie>),
    CreateRejected(ErrorValue),

    RemoveFulfilled(MovieId),
    RemoveRejected(ErrorValue),

    /// A search was issued with this generation.
    SearchStarted { generation: u64 },
    SearchFulfilled { generation: u64, results: Vec<Movie> },
    SearchRejected { generation: u64, error: ErrorValue },

    /// Local only. Empties the search results and leaves search mode.
    ClearSearch { generation: u64 },

    ImportPending,
    ImportFulfilled(Vec<Movie>),
    ImportRejected(ErrorValue),
}

impl CatalogEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchAllPending => "fetch_all.pending",
            Self::FetchAllFulfilled(_) => "fetch_all.fulfilled",
            Self::FetchAllRejected(_) => "fetch_all.rejected",
            Self::FetchByIdPending => "fetch_by_id.pending",
            Self::FetchByIdFulfilled(_) => "fetch_by_id.fulfilled",
            Self::FetchByIdRejected(_) => "fetch_by_id.rejected",
            Self::CreateFulfilled(_) => "create.fulfilled",
            Self::CreateRejected(_) => "create.rejected",
            Self::RemoveFulfilled(_) => "remove.fulfilled",
            Self::RemoveRejected(_) => "remove.rejected",
            Self::SearchStarted { .. } => "search.started",
            Self::SearchFulfilled { .. } => "search.fulfilled",
            Self::SearchRejected { .. } => "search.rejected",
            Self::ClearSearch { .. } => "clear_search",
            Self::ImportPending => "import.pending",
            Self::ImportFulfilled(_) => "import.fulfilled",
            Self::ImportRejected(_) => "import.rejected",
        }
    }
}

/// Applies an authentication event.
pub fn reduce_auth(state: &mut AuthState, event: AuthEvent) -> bool {
    match event {
        AuthEvent::RegisterPending | AuthEvent::LoginPending => {
            state.loading = true;
            state.error = None;
        }
        AuthEvent::RegisterFulfilled(_) => {
            state.loading = false;
        }
        AuthEvent::LoginFulfilled { token } => {
            state.loading = false;
            state.error = None;
            state.token = Some(token);
        }
        AuthEvent::RegisterRejected(error) | AuthEvent::LoginRejected(error) => {
            tracing::debug!(error = %error, "auth request rejected");
            state.loading = false;
            state.error = Some(error);
        }
        AuthEvent::Logout => {
            if state.token.is_none() && state.error.is_none() {
                return false;
            }
            state.token = None;
            state.error = None;
        }
    }
    true
}

/// Returns true when a search resolution with `generation` should be dropped.
fn is_stale(state: &CatalogState, generation: u64, policy: &CatalogPolicy) -> bool {
    policy.stale == StalePolicy::Discard && generation < state.search_generation
}

/// Applies a catalog event.
#[allow(clippy::too_many_lines)]
pub fn reduce_catalog(state: &mut CatalogState, event: CatalogEvent, policy: &CatalogPolicy) -> bool {
    let _span = tracing::trace_span!("reduce_catalog", event = event.name()).entered();

    match event {
        CatalogEvent::FetchAllPending | CatalogEvent::FetchByIdPending | CatalogEvent::ImportPending => {
            state.loading = true;
            state.error = None;
        }
        CatalogEvent::FetchAllFulfilled(movies) => {
            state.loading = false;
            state.entries = movies;
        }
        CatalogEvent::FetchAllRejected(error) => {
            state.loading = false;
            state.error = Some(error);
            state.entries.clear();
        }
        CatalogEvent::FetchByIdFulfilled(movie) => {
            state.loading = false;
            state.selected = movie;
        }
        CatalogEvent::FetchByIdRejected(error) | CatalogEvent::ImportRejected(error) => {
            state.loading = false;
            state.error = Some(error);
        }
        CatalogEvent::CreateFulfilled(Some(movie)) => {
            tracing::debug!(movie_id = %movie.id, "adding created movie");
            upsert(&mut state.entries, movie);
        }
        CatalogEvent::CreateFulfilled(None) => return false,
        CatalogEvent::CreateRejected(error) | CatalogEvent::RemoveRejected(error) => {
            state.error = Some(error);
        }
        CatalogEvent::RemoveFulfilled(id) => {
            if !state.remove_everywhere(id) {
                tracing::debug!(movie_id = %id, "removed movie was not in either listing");
                return false;
            }
        }
        CatalogEvent::SearchStarted { generation } => {
            state.search_generation = state.search_generation.max(generation);
            return false;
        }
        CatalogEvent::SearchFulfilled { generation, results } => {
            if is_stale(state, generation, policy) {
                tracing::debug!(
                    generation = generation,
                    current = state.search_generation,
                    "discarding stale search results"
                );
                return false;
            }
            state.search_results = results;
            state.search_active = true;
        }
        CatalogEvent::SearchRejected { generation, error } => {
            if is_stale(state, generation, policy) {
                tracing::debug!(generation = generation, "discarding stale search failure");
                return false;
            }
            state.error = Some(error);
            state.search_active = false;
        }
        CatalogEvent::ClearSearch { generation } => {
            state.search_generation = state.search_generation.max(generation);
            state.search_results.clear();
            state.search_active = false;
        }
        CatalogEvent::ImportFulfilled(movies) => {
            state.loading = false;
            tracing::debug!(imported = movies.len(), merge = ?policy.import_merge, "merging imported movies");
            merge_imported(&mut state.entries, movies, policy.import_merge);
        }
    }
    true
}

fn merge_imported(entries: &mut Vec<Movie>, imported: Vec<Movie>, merge: ImportMerge) {
    match merge {
        ImportMerge::Append => entries.extend(imported),
        ImportMerge::ReplaceById => {
            for movie in imported {
                upsert(entries, movie);
            }
        }
    }
}

/// Replaces the entry sharing `movie.id` in place, or appends.
fn upsert(entries: &mut Vec<Movie>, movie: Movie) {
    match entries.iter_mut().find(|existing| existing.id == movie.id) {
        Some(existing) => *existing = movie,
        None => entries.push(movie),
    }
}
