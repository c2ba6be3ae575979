//! Authentication store.
//!
//! [`AuthStore`] owns the session token and the register/login lifecycle. It
//! dispatches [`AuthEvent`]s into a [`StateCell`]; the remote calls themselves
//! go through [`CatalogApi`].

use super::handler::{reduce_auth, AuthEvent};
use super::state::AuthState;
use super::store::StateCell;
use crate::domain::{Account, Credentials, Registration, Session};
use crate::remote::{CatalogApi, Outcome};
use tokio::sync::watch;
use tracing::Instrument;

/// Session token and register/login lifecycle.
#[derive(Debug)]
pub struct AuthStore {
    api: CatalogApi,
    state: StateCell<AuthState>,
}

impl AuthStore {
    #[must_use]
    pub fn new(api: CatalogApi) -> Self {
        Self {
            api,
            state: StateCell::default(),
        }
    }

    fn dispatch(&self, event: AuthEvent) -> bool {
        self.state.commit(|state| reduce_auth(state, event))
    }

    /// Creates an account.
    ///
    /// All four fields are sent verbatim; a password mismatch is left for the
    /// server to reject. The session is not touched either way.
    ///
    /// # Errors
    ///
    /// Returns the stored [`ErrorValue`](crate::domain::ErrorValue) when the
    /// server rejects the registration or cannot be reached.
    pub async fn register(&self, registration: Registration) -> Outcome<Account> {
        let span = tracing::debug_span!("auth.register");
        async move {
            self.dispatch(AuthEvent::RegisterPending);
            match self.api.register(&registration).await {
                Ok(account) => {
                    tracing::debug!("account created");
                    self.dispatch(AuthEvent::RegisterFulfilled(account.clone()));
                    Ok(account)
                }
                Err(error) => {
                    self.dispatch(AuthEvent::RegisterRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Opens a session and stores its token.
    ///
    /// On rejection any previously held token is kept.
    ///
    /// # Errors
    ///
    /// Returns the stored error when the credentials are rejected or the
    /// server cannot be reached.
    pub async fn login(&self, credentials: Credentials) -> Outcome<String> {
        let span = tracing::debug_span!("auth.login");
        async move {
            self.dispatch(AuthEvent::LoginPending);
            match self.api.login(&credentials).await {
                Ok(token) => {
                    tracing::debug!(has_token = !token.is_empty(), "session opened");
                    self.dispatch(AuthEvent::LoginFulfilled { token: token.clone() });
                    Ok(token)
                }
                Err(error) => {
                    self.dispatch(AuthEvent::LoginRejected(error.clone()));
                    Err(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Forgets the session token and any auth error. Local only.
    pub fn logout(&self) {
        if self.dispatch(AuthEvent::Logout) {
            tracing::debug!("logged out");
        }
    }

    /// Sets the token directly, e.g. from a token saved by an earlier run.
    pub fn restore(&self, token: impl Into<String>) {
        let token = token.into();
        self.dispatch(AuthEvent::LoginFulfilled { token });
    }

    /// Current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.read(|state| state.token.clone())
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.state.read(AuthState::session)
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
