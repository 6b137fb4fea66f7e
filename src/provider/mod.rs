//! Auth provider trait and the GoTrue HTTP implementation.

pub mod gotrue;

pub use gotrue::GotrueClient;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::AuthError;
use crate::types::{Session, UserProfile};

/// Backend seam the session facade talks through.
///
/// The production implementation is [`GotrueClient`]; tests substitute an
/// in-memory fake. Implementations own the current session and are expected
/// to be internally synchronized (shared via `Arc` across tasks).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Register a new user, attaching arbitrary profile metadata.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Map<String, Value>,
    ) -> Result<Session, AuthError>;

    /// The current session, silently refreshed if expired.
    /// `Ok(None)` means "not signed in", not an error.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Fresh profile for the signed-in user, fetched from the server.
    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError>;

    /// Invalidate the session server-side and locally. A failure leaves the
    /// local session untouched.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
