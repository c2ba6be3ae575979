//! Error types for the movieshelf client.
//!
//! Two kinds of failure live here. [`ShelfError`] is the crate's `Error` type for
//! operations that can genuinely fail to run (bad configuration, I/O, building
//! the HTTP transport). [`ErrorValue`] is the *value* a store keeps in its
//! `error` field after a remote operation is rejected; it is data to render,
//! never something the stores return as `Err`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for movieshelf operations.
///
/// Expected remote failures (bad credentials, invalid import file, expired
/// token) never surface as this type from the stores; they become
/// [`ErrorValue`]s in state. `ShelfError` covers the rest.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP transport could not be constructed or a request could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// User input was rejected before anything was sent.
    #[error("Invalid input: {0}")]
    Input(String),

    /// A remote operation was rejected. Used by the CLI to turn state errors
    /// into a process exit status.
    #[error("{}", .0.user_message())]
    Remote(ErrorValue),
}

impl From<toml::de::Error> for ShelfError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<crate::domain::movie::DraftError> for ShelfError {
    fn from(e: crate::domain::movie::DraftError) -> Self {
        Self::Input(e.to_string())
    }
}

/// A specialized `Result` type for movieshelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Machine-readable failure kinds reported by the movies API.
///
/// Serialized as the API's SCREAMING_SNAKE code string. Codes this client does
/// not know are preserved verbatim in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Registration with an email that already has an account.
    UserExists,
    /// Login with a wrong email/password pair.
    InvalidCredentials,
    /// Import file is not in the `Title, Year, Format, Stars` line format.
    FileInvalid,
    /// Session token is missing, invalid or expired.
    WrongToken,
    /// Request body or query failed server-side validation.
    FormatError,
    /// No movie exists with the requested id.
    MovieNotFound,
    /// Any other code string.
    Other(String),
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserExists => "USER_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::FileInvalid => "FILE_INVALID",
            Self::WrongToken => "WRONG_TOKEN",
            Self::FormatError => "FORMAT_ERROR",
            Self::MovieNotFound => "MOVIE_NOT_FOUND",
            Self::Other(code) => code,
        }
    }

    /// Parses a wire code string. Never fails; unknown codes map to `Other`.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "USER_EXISTS" => Self::UserExists,
            "INVALID_CREDENTIALS" => Self::InvalidCredentials,
            "FILE_INVALID" => Self::FileInvalid,
            "WRONG_TOKEN" => Self::WrongToken,
            "FORMAT_ERROR" => Self::FormatError,
            "MOVIE_NOT_FOUND" => Self::MovieNotFound,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::parse(&code))
    }
}

/// A structured failure reported by the API: `{"code": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub code: ErrorCode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Per-field validation details, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
}

/// The error value a store holds after a rejected operation.
///
/// Stores never interpret this beyond storing it. Callers render it with
/// [`ErrorValue::user_message`] or match on [`ErrorValue::code`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorValue {
    Structured(ApiFailure),
    Message(String),
}

impl ErrorValue {
    /// Builds a plain message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Builds a structured error with only a code.
    #[must_use]
    pub const fn code_only(code: ErrorCode) -> Self {
        Self::Structured(ApiFailure {
            code,
            message: None,
            fields: None,
        })
    }

    /// Returns the machine-readable code, if the API supplied one.
    #[must_use]
    pub const fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Structured(failure) => Some(&failure.code),
            Self::Message(_) => None,
        }
    }

    /// Returns the text shown to a user for this error.
    ///
    /// Known codes get a fixed explanation; other structured errors show their
    /// message or, lacking one, the code itself.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::Structured(failure) => match failure.code {
                ErrorCode::FileInvalid => "Invalid file format. Ensure the file follows the format: \
                                           Title, Release Year, Format, Stars."
                    .to_string(),
                ErrorCode::WrongToken => "Invalid or expired token. Please log in again.".to_string(),
                ErrorCode::InvalidCredentials => "Invalid email or password".to_string(),
                ErrorCode::UserExists => "A user with this email already exists".to_string(),
                _ => failure
                    .message
                    .clone()
                    .unwrap_or_else(|| failure.code.to_string()),
            },
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}
