//! Domain layer for the movieshelf client.
//!
//! Core types independent of the transport and of the state containers: the
//! movie model, account/session types, and the error types shared by every
//! other layer.
//!
//! # Organization
//!
//! - [`error`]: `ShelfError`, the stored [`ErrorValue`], and API error codes
//! - [`movie`]: `Movie`, `MovieDraft`, and their value types
//! - [`account`]: registration, credentials, and the session token
//!
//! # Examples
//!
//! ```
//! use movieshelf::domain::{ErrorCode, ErrorValue};
//!
//! let error = ErrorValue::code_only(ErrorCode::WrongToken);
//! assert_eq!(error.user_message(), "Invalid or expired token. Please log in again.");
//! ```

pub mod account;
pub mod error;
pub mod movie;

pub use account::{Account, Credentials, Registration, Session};
pub use error::{ApiFailure, ErrorCode, ErrorValue, Result, ShelfError};
pub use movie::{Actor, DraftError, Format, Movie, MovieDraft, MovieId};
