//! Account and session types.

use serde::{Deserialize, Serialize};

/// Fields sent to create an account, verbatim.
///
/// The client does not check that `password` and `confirm_password` match; the
/// server decides. [`Registration::passwords_match`] is offered to input
/// surfaces that want to catch the mistake early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The account representation returned by registration.
///
/// Passed through as the server sent it; after envelope unwrapping the client
/// makes no assumptions about its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(pub serde_json::Value);

impl Account {
    /// Returns a string field of the account, if present.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

/// The session credential held for the process lifetime.
///
/// Created by a successful login and cleared only by logout. There is no
/// refresh or expiry handling; an expired token surfaces as a `WRONG_TOKEN`
/// rejection on the next catalog request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
}

impl Session {
    /// True when a non-empty token is held.
    ///
    /// A login whose response carried no string token stores `""`, which counts
    /// as not authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}
