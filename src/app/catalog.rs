//! Catalog store.
//!
//! [`CatalogStore`] owns the full listing, the search listing, the search flag,
//! the selected movie and the shared `loading`/`error` fields. Each operation
//! dispatches its lifecycle events into a [`StateCell`]; overlapping operations
//! are allowed and each commit is atomic.
//!
//! The caller passes the session token to every remote operation; the store
//! never reads the auth state itself.

use super::handler::{reduce_catalog, CatalogEvent};
use super::modes::CatalogPolicy;
use super::state::CatalogState;
use super::store::StateCell;
use crate::domain::{Movie, MovieDraft, MovieId};
use crate::remote::{CatalogApi, ImportFile, Outcome, SearchField};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::Instrument;

/// Catalog listings and their request lifecycle.
#[derive(Debug)]
pub struct CatalogStore {
    api: CatalogApi,
    policy: CatalogPolicy,
    state: StateCell<CatalogState>,
    generations: AtomicU64,
}

impl CatalogStore {
    /// Creates an empty store.
    ///
    /// # Parameters
    ///
    /// * `api` - Typed gateway to the movies API
    /// * `policy` - Stale-search and import-merge behavior
    #[must_use]
    pub fn new(api: CatalogApi, policy: CatalogPolicy) -> Self {
        Self {
            api,
            policy,
            state: StateCell::default(),
            generations: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &CatalogPolicy {
        &self.policy
    }

    fn dispatch(&self, event: CatalogEvent) -> bool {
        self.state.commit(|state| reduce_catalog(state, event, &self.policy))
    }

    fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replaces `entries` with the server's listing.
    ///
    /// Search state is left alone. A payload that is not a list yields an
    /// empty catalog rather than an error.
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection; `entries` is cleared in that case.
    pub async fn fetch_all(&self, token: &str) -> Outcome<Vec<Movie>> {
        let span = tracing::debug_span!("catalog.fetch_all");
        async move {
            self.dispatch(CatalogEvent::FetchAllPending);
            match self.api.list(token).await {
                Ok(movies) => {
                    tracing::debug!(count = movies.len(), "catalog fetched");
                    self.dispatch(CatalogEvent::FetchAllFulfilled(movies.clone()));
                    Ok(movies)
                }
                Err(error) => {
                    tracing::debug!(error = %error, "fetch all rejected");
                    self.dispatch(CatalogEvent::FetchAllRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Loads one movie into `selected`.
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection; `selected` keeps its old value.
    pub async fn fetch_by_id(&self, token: &str, id: MovieId) -> Outcome<Option<Movie>> {
        let span = tracing::debug_span!("catalog.fetch_by_id", movie_id = %id);
        async move {
            self.dispatch(CatalogEvent::FetchByIdPending);
            match self.api.get(token, id).await {
                Ok(movie) => {
                    self.dispatch(CatalogEvent::FetchByIdFulfilled(movie.clone()));
                    Ok(movie)
                }
                Err(error) => {
                    self.dispatch(CatalogEvent::FetchByIdRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Creates a movie and adds it to `entries`.
    ///
    /// An entry already holding the returned id (e.g. from a listing that
    /// landed after the server created it) is replaced in place.
    ///
    /// `Ok(None)` means the server answered without one of `id`, `title`,
    /// `year`, `format`; nothing is added and no error is stored.
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection.
    pub async fn create(&self, token: &str, draft: MovieDraft) -> Outcome<Option<Movie>> {
        let span = tracing::debug_span!("catalog.create", title = %draft.title);
        async move {
            match self.api.create(token, &draft).await {
                Ok(movie) => {
                    self.dispatch(CatalogEvent::CreateFulfilled(movie.clone()));
                    Ok(movie)
                }
                Err(error) => {
                    self.dispatch(CatalogEvent::CreateRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Deletes a movie and drops it from both listings.
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection; both listings are unchanged.
    pub async fn remove(&self, token: &str, id: MovieId) -> Outcome<MovieId> {
        let span = tracing::debug_span!("catalog.remove", movie_id = %id);
        async move {
            match self.api.delete(token, id).await {
                Ok(id) => {
                    self.dispatch(CatalogEvent::RemoveFulfilled(id));
                    Ok(id)
                }
                Err(error) => {
                    self.dispatch(CatalogEvent::RemoveRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Searches by title. See [`CatalogStore::search`].
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection.
    pub async fn search_by_title(&self, token: &str, query: &str) -> Outcome<Vec<Movie>> {
        self.search(token, SearchField::Title, query).await
    }

    /// Searches by actor name. See [`CatalogStore::search`].
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection.
    pub async fn search_by_actor(&self, token: &str, query: &str) -> Outcome<Vec<Movie>> {
        self.search(token, SearchField::Actor, query).await
    }

    /// Replaces `search_results` and enters search mode.
    ///
    /// On rejection the error is stored and search mode is left, so results
    /// from an earlier search are no longer authoritative. Under
    /// [`StalePolicy::Discard`](super::modes::StalePolicy::Discard) a
    /// resolution that was overtaken by a newer search or a clear is dropped;
    /// the caller still receives it.
    ///
    /// # Errors
    ///
    /// Returns the error on rejection, whether or not it was committed.
    pub async fn search(&self, token: &str, field: SearchField, query: &str) -> Outcome<Vec<Movie>> {
        let generation = self.next_generation();
        let span = tracing::debug_span!("catalog.search", field = field.as_str(), generation = generation);
        async move {
            self.dispatch(CatalogEvent::SearchStarted { generation });
            match self.api.search(token, field, query).await {
                Ok(results) => {
                    tracing::debug!(count = results.len(), "search resolved");
                    self.dispatch(CatalogEvent::SearchFulfilled {
                        generation,
                        results: results.clone(),
                    });
                    Ok(results)
                }
                Err(error) => {
                    self.dispatch(CatalogEvent::SearchRejected {
                        generation,
                        error: error.clone(),
                    });
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Empties `search_results` and leaves search mode. Local only.
    pub fn clear_search(&self) {
        let generation = self.next_generation();
        tracing::debug!(generation = generation, "clearing search");
        self.dispatch(CatalogEvent::ClearSearch { generation });
    }

    /// Uploads an import file and merges the returned movies into `entries`.
    ///
    /// Does not refetch the catalog; callers wanting the server's canonical
    /// listing follow up with [`CatalogStore::fetch_all`].
    ///
    /// # Errors
    ///
    /// Returns the stored error on rejection.
    pub async fn bulk_import(&self, token: &str, file: ImportFile) -> Outcome<Vec<Movie>> {
        let span = tracing::debug_span!("catalog.bulk_import", file_name = %file.file_name, size = file.bytes.len());
        async move {
            self.dispatch(CatalogEvent::ImportPending);
            match self.api.import(token, &file).await {
                Ok(movies) => {
                    tracing::debug!(count = movies.len(), "import accepted");
                    self.dispatch(CatalogEvent::ImportFulfilled(movies.clone()));
                    Ok(movies)
                }
                Err(error) => {
                    self.dispatch(CatalogEvent::ImportRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Refetches the catalog and leaves search mode.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the search is cleared regardless.
    pub async fn refresh(&self, token: &str) -> Outcome<Vec<Movie>> {
        let fetched = self.fetch_all(token).await;
        self.clear_search();
        fetched
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }
}
