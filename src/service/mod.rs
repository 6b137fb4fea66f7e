//! Session facade over an [`AuthProvider`].

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::LatchkeyConfig;
use crate::error::AuthError;
use crate::provider::{AuthProvider, GotrueClient};
use crate::types::{Session, UserProfile, FIRST_NAME_KEY};

/// Thin pass-through layer between callers and the auth provider.
///
/// `login`/`sign_up` surface the provider's error; the other three
/// operations collapse any failure into a negative/absent result so that
/// probes (is someone signed in?) cannot fail loudly. The collapsed errors
/// are still logged at `warn` so the cause stays observable.
///
/// The facade holds no state of its own; the provider owns the session.
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Convenience constructor backed by a [`GotrueClient`].
    pub fn gotrue(config: &LatchkeyConfig) -> Result<Self, AuthError> {
        Ok(Self::new(Arc::new(GotrueClient::new(config)?)))
    }

    /// Log in with email and password.
    ///
    /// No local validation is done here; callers enforce non-empty fields.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tracing::debug!(email, "logging in");
        self.provider.sign_in(email, password).await
    }

    /// Register a new user, storing `first_name` as profile metadata.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
    ) -> Result<Session, AuthError> {
        tracing::debug!(email, "signing up");
        let mut metadata = Map::new();
        metadata.insert(FIRST_NAME_KEY.to_string(), Value::from(first_name));
        self.provider.sign_up(email, password, metadata).await
    }

    /// Whether a usable session exists. Provider errors read as "no".
    pub async fn is_authenticated(&self) -> bool {
        match self.provider.current_session().await {
            Ok(Some(session)) => !session.access_token.is_empty(),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "session probe failed");
                false
            }
        }
    }

    /// Invalidate the current session. Returns `false` on failure, leaving
    /// session state to the provider.
    pub async fn sign_out(&self) -> bool {
        match self.provider.sign_out().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "sign-out failed");
                false
            }
        }
    }

    /// Fresh profile for the signed-in user, or `None` when signed out or
    /// on any provider failure.
    pub async fn current_user(&self) -> Option<UserProfile> {
        match self.provider.current_user().await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "current-user fetch failed");
                None
            }
        }
    }
}
