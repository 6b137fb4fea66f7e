//! Configuration for the provider endpoint (URL + API key).

use std::time::Duration;

use crate::error::AuthError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint configuration for a GoTrue-compatible backend.
///
/// Both values are deployment-supplied: the project base URL (the client
/// appends `/auth/v1/...`) and the public API key sent in the `apikey`
/// header of every request.
#[derive(Debug, Clone)]
pub struct LatchkeyConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl LatchkeyConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from environment variables (`LATCHKEY_URL`, `LATCHKEY_API_KEY`,
    /// with `SUPABASE_URL`/`SUPABASE_ANON_KEY` as fallbacks), reading a
    /// `.env` file first if one is present.
    pub fn from_env() -> Result<Self, AuthError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let url = first_env(&["LATCHKEY_URL", "SUPABASE_URL"]).ok_or_else(|| {
            AuthError::Configuration("LATCHKEY_URL (or SUPABASE_URL) is not set".to_string())
        })?;
        let api_key = first_env(&["LATCHKEY_API_KEY", "SUPABASE_ANON_KEY"]).ok_or_else(|| {
            AuthError::Configuration(
                "LATCHKEY_API_KEY (or SUPABASE_ANON_KEY) is not set".to_string(),
            )
        })?;

        Ok(Self::new(url, api_key))
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}
