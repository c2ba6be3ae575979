//! Remote layer: the movies API contract, its HTTP transport, and the typed
//! decode step between raw payloads and the stores.
//!
//! # Organization
//!
//! - [`service`]: the [`RemoteService`] transport trait and request types
//! - [`http`]: [`HttpRemote`], the `reqwest` implementation
//! - [`decode`]: envelope unwrapping, token extraction, record decoding, and
//!   failure conversion
//!
//! [`CatalogApi`] ties them together: it calls a `RemoteService`, decodes the
//! payload, and converts failures into stored [`ErrorValue`]s, so the stores
//! only ever handle typed outcomes.

pub mod decode;
pub mod http;
pub mod service;

pub use http::HttpRemote;
pub use service::{ImportFile, Operation, Page, RemoteFailure, RemoteResult, RemoteService, SearchField};

use crate::domain::{Account, Credentials, ErrorValue, Movie, MovieDraft, MovieId, Registration};
use std::sync::Arc;

/// Typed outcome of a remote operation as seen by the stores.
pub type Outcome<T> = std::result::Result<T, ErrorValue>;

/// Typed gateway over a [`RemoteService`].
///
/// Cheap to clone; clones share the underlying service.
#[derive(Clone)]
pub struct CatalogApi {
    service: Arc<dyn RemoteService>,
    page: Page,
}

impl std::fmt::Debug for CatalogApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogApi")
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

impl CatalogApi {
    pub fn new(service: Arc<dyn RemoteService>, page: Page) -> Self {
        Self { service, page }
    }

    /// Creates an account. The account representation is passed through.
    pub async fn register(&self, registration: &Registration) -> Outcome<Account> {
        self.service
            .create_account(registration)
            .await
            .map(|payload| Account(decode::unwrap_envelope(payload)))
            .map_err(|failure| decode::failure_to_error(failure, Operation::CreateUser))
    }

    /// Opens a session and returns its token (`""` when none was sent).
    pub async fn login(&self, credentials: &Credentials) -> Outcome<String> {
        self.service
            .create_session(credentials)
            .await
            .map(|payload| decode::decode_token(&payload))
            .map_err(|failure| decode::failure_to_error(failure, Operation::Login))
    }

    /// Lists the catalog within the configured page window.
    pub async fn list(&self, token: &str) -> Outcome<Vec<Movie>> {
        self.service
            .list_movies(token, self.page)
            .await
            .map(|payload| decode::decode_listing(&decode::unwrap_envelope(payload)))
            .map_err(|failure| decode::failure_to_error(failure, Operation::FetchMovies))
    }

    /// Fetches one movie. `Ok(None)` means the payload did not decode.
    pub async fn get(&self, token: &str, id: MovieId) -> Outcome<Option<Movie>> {
        self.service
            .get_movie(token, id)
            .await
            .map(|payload| {
                let movie = decode::decode_movie(&decode::unwrap_envelope(payload));
                if movie.is_none() {
                    tracing::warn!(movie_id = %id, "movie payload did not decode");
                }
                movie
            })
            .map_err(|failure| decode::failure_to_error(failure, Operation::FetchMovie))
    }

    /// Creates a movie.
    ///
    /// `Ok(None)` means the server accepted the request but the response was
    /// missing one of `id`, `title`, `year`, `format`; such a record is not
    /// added to the catalog and is not an error.
    pub async fn create(&self, token: &str, draft: &MovieDraft) -> Outcome<Option<Movie>> {
        self.service
            .create_movie(token, draft)
            .await
            .map(|payload| {
                let record = decode::unwrap_envelope(payload);
                if !decode::is_complete_record(&record) {
                    tracing::warn!(title = %draft.title, "created movie response is incomplete, not adding it");
                    return None;
                }
                let movie = decode::decode_movie(&record);
                if movie.is_none() {
                    tracing::warn!(title = %draft.title, "created movie response did not decode, not adding it");
                }
                movie
            })
            .map_err(|failure| decode::failure_to_error(failure, Operation::AddMovie))
    }

    /// Deletes a movie and echoes its id.
    pub async fn delete(&self, token: &str, id: MovieId) -> Outcome<MovieId> {
        self.service
            .delete_movie(token, id)
            .await
            .map(|()| id)
            .map_err(|failure| decode::failure_to_error(failure, Operation::DeleteMovie))
    }

    /// Uploads an import file and returns the movies the server created.
    pub async fn import(&self, token: &str, file: &ImportFile) -> Outcome<Vec<Movie>> {
        self.service
            .import_movies(token, file)
            .await
            .map(|payload| decode::decode_listing(&decode::unwrap_envelope(payload)))
            .map_err(|failure| decode::failure_to_error(failure, Operation::ImportMovies))
    }

    /// Searches by title or actor.
    pub async fn search(&self, token: &str, field: SearchField, query: &str) -> Outcome<Vec<Movie>> {
        self.service
            .search_movies(token, field, query)
            .await
            .map(|payload| decode::decode_listing(&decode::unwrap_envelope(payload)))
            .map_err(|failure| decode::failure_to_error(failure, Operation::search(field)))
    }
}
