//! GoTrue REST client (Supabase Auth wire protocol).

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::LatchkeyConfig;
use crate::error::AuthError;
use crate::types::{Session, UserProfile};

use super::AuthProvider;

/// HTTP client for a GoTrue-compatible auth backend.
///
/// Owns the current session in memory for the lifetime of the process.
/// Construct one explicitly and share it via `Arc`; there is no global
/// instance.
///
/// # Example
/// ```no_run
/// use latchkey::config::LatchkeyConfig;
/// use latchkey::provider::GotrueClient;
///
/// let config = LatchkeyConfig::new("https://proj.supabase.co", "anon-key");
/// let client = GotrueClient::new(&config)?;
/// # Ok::<(), latchkey::error::AuthError>(())
/// ```
pub struct GotrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    // Never held across an await; refresh races lose harmlessly (last write
    // wins with an equally valid session).
    session: RwLock<Option<Session>>,
}

impl GotrueClient {
    pub fn new(config: &LatchkeyConfig) -> Result<Self, AuthError> {
        if config.url.trim().is_empty() {
            return Err(AuthError::Configuration(
                "provider URL must not be empty".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(AuthError::Configuration(
                "provider API key must not be empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            session: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .header("apikey", &self.api_key)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.endpoint(path))
            .header("apikey", &self.api_key)
    }

    fn cached_session(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }

    fn store_session(&self, session: Option<Session>) {
        *self.session.write().unwrap() = session;
    }

    async fn request_session(&self, req: reqwest::RequestBuilder) -> Result<Session, AuthError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }
        let payload: SessionResponse = resp.json().await?;
        payload.into_session()
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        tracing::debug!("refreshing expired session");
        let result = self
            .request_session(
                self.post("token?grant_type=refresh_token")
                    .json(&RefreshGrantRequest { refresh_token }),
            )
            .await;
        if let Err(AuthError::Api { .. }) = result {
            // The server rejected the refresh token; the session is dead.
            self.store_session(None);
        }
        result
    }
}

#[async_trait]
impl AuthProvider for GotrueClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .request_session(
                self.post("token?grant_type=password")
                    .json(&PasswordGrantRequest { email, password }),
            )
            .await?;
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Map<String, Value>,
    ) -> Result<Session, AuthError> {
        let session = self
            .request_session(self.post("signup").json(&SignUpRequest {
                email,
                password,
                data: metadata,
            }))
            .await?;
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.cached_session() else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }
        let refresh_token = session.refresh_token.ok_or(AuthError::SessionExpired)?;
        let fresh = self.refresh_session(&refresh_token).await?;
        self.store_session(Some(fresh.clone()));
        Ok(Some(fresh))
    }

    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let Some(session) = self.current_session().await? else {
            return Ok(None);
        };
        let resp = self
            .get("user")
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }
        let user: UserProfile = resp.json().await?;
        // Keep the cached session's snapshot in step with the server.
        if let Some(cached) = self.session.write().unwrap().as_mut() {
            cached.user = user.clone();
        }
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.cached_session() else {
            // Signing out while signed out is a no-op.
            return Ok(());
        };
        let resp = self
            .post("logout")
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }
        self.store_session(None);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct RefreshGrantRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

impl SessionResponse {
    fn into_session(self) -> Result<Session, AuthError> {
        // A 200 without an access token is GoTrue's "confirmation email
        // sent" sign-up response.
        let (Some(access_token), Some(user)) = (self.access_token, self.user) else {
            return Err(AuthError::ConfirmationRequired);
        };
        let expires_at = self
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)));
        Ok(Session {
            access_token,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
            refresh_token: self.refresh_token,
            expires_at,
            user,
        })
    }
}

/// GoTrue error bodies vary by server version: `{msg}`, `{message}`,
/// `{error, error_description}`, and `{error_code, msg}` all occur.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

fn parse_error_body(status: u16, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed.error_code.or_else(|| parsed.error.clone());
    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    AuthError::Api {
        status,
        code,
        message,
    }
}
