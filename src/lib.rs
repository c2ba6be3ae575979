//! Movieshelf: client-side state for a movie catalog REST API.
//!
//! Movieshelf provides:
//! - An authentication store holding the session token and the register/login lifecycle
//! - A catalog store holding the full listing, a separate search listing, a
//!   search-mode flag, the selected movie, and shared loading/error fields
//! - A transport-agnostic [`RemoteService`] contract with a `reqwest` implementation
//! - Snapshot reads and change subscriptions on both stores
//! - A small CLI (`movieshelf`) driving the stores against a live server

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI shim (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - AuthStore / CatalogStore                         │  ← Orchestration
//! │  - Lifecycle events and pure reducers               │  ← State machine
//! │  - StateCell (snapshot + subscribe)                 │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Remote Layer (remote/)    │   │ UI Layer (ui/)            │
//! │ - RemoteService trait     │   │ - Listing / detail views  │
//! │ - HttpRemote (reqwest)    │   │ - Plain-text renderer     │
//! │ - Typed decode step       │   │                           │
//! └───────────────────────────┘   └───────────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Movie, account and error types (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: stores, lifecycle events, reducers
//! - [`domain`]: movie and account types, errors
//! - [`remote`]: the API contract, HTTP transport, decode step
//! - [`ui`]: view models and text rendering
//! - [`infrastructure`]: platform paths
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! Read from `~/.config/movieshelf/config.toml` (or `--config`):
//!
//! ```toml
//! api_url = "http://localhost:8000/api/v1"
//! page_limit = 100
//! page_offset = 0
//! trace_level = "debug"
//! log_to_stderr = false
//! stale_policy = "discard"
//! import_merge = "append"
//! ```
//!
//! `MOVIESHELF_API_URL` and `MOVIESHELF_TRACE_LEVEL` override the file.
//!
//! # Example
//!
//! ```rust,no_run
//! use movieshelf::{initialize, Config, Credentials};
//!
//! # async fn run() -> movieshelf::Result<()> {
//! let client = initialize(&Config::default())?;
//!
//! client.auth.login(Credentials::new("ann@example.com", "secret")).await.ok();
//! client.catalog.fetch_all(&client.token()).await.ok();
//!
//! for movie in client.catalog.snapshot().displayed() {
//!     println!("{} ({})", movie.title, movie.year);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Operations may overlap freely. Each lifecycle step is committed atomically,
//! and by default the last resolution to land wins. With
//! `stale_policy = "discard"`, a search that resolves after a newer search or
//! a clear is dropped instead.

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod remote;
pub mod ui;

pub use app::{AuthStore, CatalogPolicy, CatalogStore, ImportMerge, StalePolicy};
pub use domain::{
    Account, Credentials, ErrorCode, ErrorValue, Format, Movie, MovieDraft, MovieId, Registration, Result, Session,
    ShelfError,
};
pub use remote::{CatalogApi, HttpRemote, ImportFile, Page, RemoteService, SearchField};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default API root.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Client configuration.
///
/// Unknown keys in the TOML file are rejected so typos surface early.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API root all routes are resolved against. Default: [`DEFAULT_API_URL`]
    pub api_url: String,

    /// `limit` sent with list requests. Default: 100
    pub page_limit: u32,

    /// `offset` sent with list requests. Default: 0
    pub page_offset: u32,

    /// Tracing filter directive, e.g. `"debug"` or `"movieshelf=trace"`.
    ///
    /// `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// OTLP JSON trace file. Default: `<data dir>/movieshelf/movieshelf-otlp.json`
    pub trace_file: Option<PathBuf>,

    /// Also log human-readable events to stderr.
    pub log_to_stderr: bool,

    /// What to do with superseded search results.
    pub stale_policy: StalePolicy,

    /// How imported movies merge into the catalog.
    pub import_merge: ImportMerge,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_limit: 100,
            page_offset: 0,
            trace_level: None,
            trace_file: None,
            log_to_stderr: false,
            stale_policy: StalePolicy::default(),
            import_merge: ImportMerge::default(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Config`] on malformed TOML or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use movieshelf::{Config, StalePolicy};
    ///
    /// let config = Config::from_toml_str("api_url = \"http://films.test/api\"\nstale_policy = \"discard\"")?;
    /// assert_eq!(config.api_url, "http://films.test/api");
    /// assert_eq!(config.stale_policy, StalePolicy::Discard);
    /// assert_eq!(config.page_limit, 100);
    /// # Ok::<(), movieshelf::ShelfError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Io`] if the file cannot be read and
    /// [`ShelfError::Config`] if it does not parse.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicitly given file must exist. The default file is optional;
    /// when it is absent, defaults are used. Environment overrides are applied
    /// in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => {
                let default_path = infrastructure::default_config_file();
                if default_path.is_file() {
                    Self::from_toml_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `MOVIESHELF_API_URL` and `MOVIESHELF_TRACE_LEVEL` from `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_url) = lookup("MOVIESHELF_API_URL") {
            self.api_url = api_url;
        }
        if let Some(level) = lookup("MOVIESHELF_TRACE_LEVEL") {
            self.trace_level = Some(level);
        }
    }

    /// The listing page window.
    #[must_use]
    pub const fn page(&self) -> Page {
        Page {
            limit: self.page_limit,
            offset: self.page_offset,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            stale: self.stale_policy,
            import_merge: self.import_merge,
        }
    }
}

/// Both stores wired to one remote service.
///
/// The stores share the service but not their state. Catalog operations take
/// the token explicitly; [`Client::token`] reads it from the auth store.
#[derive(Debug)]
pub struct Client {
    pub auth: AuthStore,
    pub catalog: CatalogStore,
}

impl Client {
    /// Builds the stores on top of any [`RemoteService`].
    #[must_use]
    pub fn with_service(service: Arc<dyn RemoteService>, config: &Config) -> Self {
        let api = CatalogApi::new(service, config.page());
        let auth = AuthStore::new(api.clone());
        let catalog = CatalogStore::new(api, config.policy());
        Self { auth, catalog }
    }

    /// The current session token, or `""` when logged out.
    #[must_use]
    pub fn token(&self) -> String {
        self.auth.token().unwrap_or_default()
    }
}

/// Builds a [`Client`] talking HTTP to `config.api_url`.
///
/// Does not install tracing; call
/// [`observability::init_tracing`] first if spans should be recorded.
///
/// # Errors
///
/// Returns [`ShelfError::Http`] if the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<Client> {
    tracing::debug!(api_url = %config.api_url, policy = ?config.policy(), "initializing movieshelf client");
    let remote = HttpRemote::new(config.api_url.clone())?;
    Ok(Client::with_service(Arc::new(remote), config))
}
