//! Application layer: the two stores and the state machine behind them.
//!
//! This layer sits between the entry point (main.rs, or any embedding UI) and
//! the remote layer. Stores call [`CatalogApi`](crate::remote::CatalogApi),
//! turn each outcome into an event, and commit the event through a pure
//! reducer.
//!
//! # Architecture
//!
//! ```text
//! store op → pending event → reducer → commit → subscribers
//!     │
//!     └→ CatalogApi → outcome → fulfilled/rejected event → reducer → commit → subscribers
//! ```
//!
//! # Modules
//!
//! - [`auth`]: [`AuthStore`], session token and register/login lifecycle
//! - [`catalog`]: [`CatalogStore`], listings, search mode and selection
//! - [`handler`]: lifecycle events and the pure reducers
//! - [`modes`]: listing mode and the catalog's consistency policies
//! - [`state`]: state types read by callers as snapshots
//! - [`store`]: [`StateCell`], the snapshot-and-subscribe container
//!
//! # Example
//!
//! ```rust
//! use movieshelf::app::{reduce_auth, AuthEvent, AuthState};
//!
//! let mut state = AuthState::default();
//! reduce_auth(&mut state, AuthEvent::LoginFulfilled { token: "abc".into() });
//! assert!(state.is_authenticated());
//!
//! reduce_auth(&mut state, AuthEvent::Logout);
//! assert_eq!(state.token, None);
//! ```

pub mod auth;
pub mod catalog;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use auth::AuthStore;
pub use catalog::CatalogStore;
pub use handler::{reduce_auth, reduce_catalog, AuthEvent, CatalogEvent};
pub use modes::{CatalogPolicy, ImportMerge, ListingMode, StalePolicy};
pub use state::{AuthState, CatalogState};
pub use store::StateCell;
