//! Remote service abstraction.
//!
//! This module defines the [`RemoteService`] trait that abstracts over the
//! movies API transport. Implementations return raw JSON payloads; shaping them
//! into domain types is the job of [`crate::remote::decode`] and
//! [`crate::remote::CatalogApi`], so a test double only has to produce JSON.
//!
//! # Implementations
//!
//! - [`HttpRemote`](crate::remote::HttpRemote): reqwest over HTTP (default)
//! - the scriptable fake in the integration tests

use crate::domain::{Credentials, MovieDraft, MovieId, Registration};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Outcome of a single remote call.
pub type RemoteResult<T> = std::result::Result<T, RemoteFailure>;

/// A failed remote call, before conversion into a stored error value.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteFailure {
    /// The service answered and reported a failure.
    ///
    /// `body` is the parsed response body (or a JSON string holding the raw
    /// text when it was not JSON).
    Rejected { status: Option<u16>, body: Value },

    /// No response at all: connection refused, DNS failure, broken body.
    Transport(String),
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status: Some(status), .. } => write!(f, "rejected with status {status}"),
            Self::Rejected { status: None, .. } => f.write_str("rejected"),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
        }
    }
}

/// Pagination window for listing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 100, offset: 0 }
    }
}

/// The field a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Actor,
}

impl SearchField {
    /// Query parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Actor => "actor",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flat-text import file, uploaded as-is.
///
/// The expected content is one `Title, ReleaseYear, Format, Star1, Star2, ...`
/// record per line. The client never parses it; the server answers
/// `FILE_INVALID` when it is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Remote operations, used to label spans and to pick the fallback message
/// stored when a failure carries no usable error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    Login,
    FetchMovies,
    FetchMovie,
    AddMovie,
    DeleteMovie,
    ImportMovies,
    SearchByTitle,
    SearchByActor,
}

impl Operation {
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::CreateUser => "Failed to create user",
            Self::Login => "Failed to login",
            Self::FetchMovies => "Failed to fetch movies",
            Self::FetchMovie => "Failed to fetch movie",
            Self::AddMovie => "Failed to add movie",
            Self::DeleteMovie => "Failed to delete movie",
            Self::ImportMovies => "Failed to import movies",
            Self::SearchByTitle => "Failed to search movies by title",
            Self::SearchByActor => "Failed to search movies by actor",
        }
    }

    #[must_use]
    pub const fn search(field: SearchField) -> Self {
        match field {
            SearchField::Title => Self::SearchByTitle,
            SearchField::Actor => Self::SearchByActor,
        }
    }
}

/// Abstraction over the movies API transport.
///
/// Every method except `create_account` and `create_session` takes the
/// session token, which implementations send as the bare `Authorization`
/// header value. Successful calls return the raw response payload.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// `POST /users` with all four registration fields.
    async fn create_account(&self, registration: &Registration) -> RemoteResult<Value>;

    /// `POST /sessions`; the payload holds a token string or an object with one.
    async fn create_session(&self, credentials: &Credentials) -> RemoteResult<Value>;

    /// `GET /movies` within a pagination window.
    async fn list_movies(&self, token: &str, page: Page) -> RemoteResult<Value>;

    /// `GET /movies/{id}`.
    async fn get_movie(&self, token: &str, id: MovieId) -> RemoteResult<Value>;

    /// `POST /movies`.
    async fn create_movie(&self, token: &str, draft: &MovieDraft) -> RemoteResult<Value>;

    /// `DELETE /movies/{id}`. The response body is ignored.
    async fn delete_movie(&self, token: &str, id: MovieId) -> RemoteResult<()>;

    /// `POST /movies/import` with the file as multipart field `movies`.
    async fn import_movies(&self, token: &str, file: &ImportFile) -> RemoteResult<Value>;

    /// `GET /movies?{field}={query}`.
    async fn search_movies(&self, token: &str, field: SearchField, query: &str) -> RemoteResult<Value>;
}
