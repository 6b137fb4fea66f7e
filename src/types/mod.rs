//! Session and user profile payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Metadata key the sign-up flow uses for the display name.
pub const FIRST_NAME_KEY: &str = "first_name";

/// Sessions within this margin of expiry are treated as already expired,
/// so a token is never handed out with only seconds left on it.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Provider-supplied user snapshot. Read-only from the client's perspective;
/// fetched fresh from the server on each profile query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Arbitrary key/value metadata attached at sign-up.
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl UserProfile {
    /// String-valued metadata field, if present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(Value::as_str)
    }

    /// Display name stored under the `first_name` metadata key.
    pub fn first_name(&self) -> Option<&str> {
        self.metadata_str(FIRST_NAME_KEY)
    }
}

/// Provider-issued proof of authentication.
///
/// Held in memory by the provider client for the lifetime of the process;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: UserProfile,
}

impl Session {
    /// Whether the access token has expired (or is about to).
    /// Tokens without an expiry are treated as still valid.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= at,
            None => false,
        }
    }
}
