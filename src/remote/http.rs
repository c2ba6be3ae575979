//! HTTP transport for the movies API.
//!
//! [`HttpRemote`] implements [`RemoteService`] with `reqwest`. It knows routes,
//! headers and status codes; it does not interpret payloads beyond deciding
//! whether a response is a success or a rejection.
//!
//! # Routes
//!
//! | Operation | Request |
//! |---|---|
//! | create account | `POST /users` |
//! | create session | `POST /sessions` |
//! | list | `GET /movies?limit=..&offset=..` |
//! | get | `GET /movies/{id}` |
//! | create | `POST /movies` |
//! | delete | `DELETE /movies/{id}` |
//! | import | `POST /movies/import` (multipart field `movies`) |
//! | search | `GET /movies?title=..` or `GET /movies?actor=..` |

use crate::domain::error::Result;
use crate::domain::{Credentials, MovieDraft, MovieId, Registration};
use crate::remote::service::{ImportFile, Page, RemoteFailure, RemoteResult, RemoteService, SearchField};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Name of the multipart field carrying an import file.
const IMPORT_FIELD: &str = "movies";

/// `reqwest`-backed movies API client.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:8000/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("movieshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, "http remote created");

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Adds the bare token as `Authorization`. An empty token sends no header.
    fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
        if token.is_empty() {
            request
        } else {
            request.header(AUTHORIZATION, token)
        }
    }

    /// Sends a request and classifies the response.
    ///
    /// Non-2xx statuses are rejections. So is a 2xx body of the form
    /// `{"status": 0, "error": ...}`, which the API uses for validation
    /// failures. Bodies that are not JSON are kept as a JSON string.
    async fn send(&self, request: RequestBuilder, route: &'static str) -> RemoteResult<Value> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(route = route, error = %e, "request failed without response");
            RemoteFailure::Transport(e.to_string())
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteFailure::Transport(e.to_string()))?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        tracing::debug!(route = route, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(RemoteFailure::Rejected {
                status: Some(status.as_u16()),
                body,
            });
        }

        let reports_failure = body.get("status").and_then(Value::as_i64) == Some(0) && body.get("error").is_some();
        if reports_failure {
            return Err(RemoteFailure::Rejected {
                status: Some(status.as_u16()),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl RemoteService for HttpRemote {
    async fn create_account(&self, registration: &Registration) -> RemoteResult<Value> {
        let request = self.client.post(self.url("/users")).json(registration);
        self.send(request, "POST /users").await
    }

    async fn create_session(&self, credentials: &Credentials) -> RemoteResult<Value> {
        let request = self.client.post(self.url("/sessions")).json(credentials);
        self.send(request, "POST /sessions").await
    }

    async fn list_movies(&self, token: &str, page: Page) -> RemoteResult<Value> {
        let request = Self::authorized(self.client.get(self.url("/movies")), token)
            .query(&[("limit", page.limit), ("offset", page.offset)]);
        self.send(request, "GET /movies").await
    }

    async fn get_movie(&self, token: &str, id: MovieId) -> RemoteResult<Value> {
        let request = Self::authorized(self.client.get(self.url(&format!("/movies/{id}"))), token);
        self.send(request, "GET /movies/{id}").await
    }

    async fn create_movie(&self, token: &str, draft: &MovieDraft) -> RemoteResult<Value> {
        let request = Self::authorized(self.client.post(self.url("/movies")), token).json(draft);
        self.send(request, "POST /movies").await
    }

    async fn delete_movie(&self, token: &str, id: MovieId) -> RemoteResult<()> {
        let request = Self::authorized(self.client.delete(self.url(&format!("/movies/{id}"))), token);
        self.send(request, "DELETE /movies/{id}").await.map(|_| ())
    }

    async fn import_movies(&self, token: &str, file: &ImportFile) -> RemoteResult<Value> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("text/plain")
            .map_err(|e| RemoteFailure::Transport(e.to_string()))?;
        let form = Form::new().part(IMPORT_FIELD, part);

        tracing::debug!(file_name = %file.file_name, size = file.bytes.len(), "uploading import file");

        let request = Self::authorized(self.client.post(self.url("/movies/import")), token)
            .multipart(form);
        self.send(request, "POST /movies/import").await
    }

    async fn search_movies(&self, token: &str, field: SearchField, query: &str) -> RemoteResult<Value> {
        let request = Self::authorized(self.client.get(self.url("/movies")), token)
            .query(&[(field.as_str(), query)]);
        self.send(request, "GET /movies (search)").await
    }
}
