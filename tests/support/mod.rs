#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use latchkey::error::AuthError;
use latchkey::provider::AuthProvider;
use latchkey::types::{Session, UserProfile};

/// In-memory stand-in for a GoTrue backend: a table of accounts plus the
/// one current session, with switches to make individual operations fail.
#[derive(Default)]
pub struct FakeAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<Session>>,
    fail_session_probe: AtomicBool,
    fail_user_fetch: AtomicBool,
    fail_sign_out: AtomicBool,
}

struct Account {
    password: String,
    profile: UserProfile,
}

impl FakeAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_account(&self, email: &str, password: &str, first_name: &str) {
        let mut metadata = Map::new();
        metadata.insert("first_name".to_string(), Value::from(first_name));
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            created_at: Some(Utc::now()),
            user_metadata: metadata,
        };
        self.accounts.lock().expect("accounts lock poisoned").insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                profile,
            },
        );
    }

    /// Install a session directly, bypassing sign-in.
    pub fn seed_session(&self, access_token: &str) {
        let session = Session {
            access_token: access_token.to_string(),
            token_type: "bearer".to_string(),
            refresh_token: None,
            expires_at: None,
            user: UserProfile {
                id: Uuid::new_v4(),
                email: Some("seeded@example.com".to_string()),
                created_at: Some(Utc::now()),
                user_metadata: Map::new(),
            },
        };
        *self.session.lock().expect("session lock poisoned") = Some(session);
    }

    pub fn has_session(&self) -> bool {
        self.session.lock().expect("session lock poisoned").is_some()
    }

    pub fn fail_session_probe(&self) {
        self.fail_session_probe.store(true, Ordering::SeqCst);
    }

    pub fn fail_user_fetch(&self) {
        self.fail_user_fetch.store(true, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::SeqCst);
    }

    fn mint_session(&self, profile: UserProfile) -> Session {
        let session = Session {
            access_token: format!("fake-access-{}", Uuid::new_v4()),
            token_type: "bearer".to_string(),
            refresh_token: Some(format!("fake-refresh-{}", Uuid::new_v4())),
            expires_at: Some(Utc::now() + chrono::Duration::hours(1)),
            user: profile,
        };
        *self.session.lock().expect("session lock poisoned") = Some(session.clone());
        session
    }

    fn invalid_credentials() -> AuthError {
        AuthError::Api {
            status: 400,
            code: Some("invalid_credentials".to_string()),
            message: "Invalid login credentials".to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let profile = {
            let accounts = self.accounts.lock().expect("accounts lock poisoned");
            let account = accounts.get(email).ok_or_else(Self::invalid_credentials)?;
            if account.password != password {
                return Err(Self::invalid_credentials());
            }
            account.profile.clone()
        };
        Ok(self.mint_session(profile))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Map<String, Value>,
    ) -> Result<Session, AuthError> {
        let profile = {
            let mut accounts = self.accounts.lock().expect("accounts lock poisoned");
            if accounts.contains_key(email) {
                return Err(AuthError::Api {
                    status: 422,
                    code: Some("user_already_exists".to_string()),
                    message: "User already registered".to_string(),
                });
            }
            let profile = UserProfile {
                id: Uuid::new_v4(),
                email: Some(email.to_string()),
                created_at: Some(Utc::now()),
                user_metadata: metadata,
            };
            accounts.insert(
                email.to_string(),
                Account {
                    password: password.to_string(),
                    profile: profile.clone(),
                },
            );
            profile
        };
        Ok(self.mint_session(profile))
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        if self.fail_session_probe.load(Ordering::SeqCst) {
            return Err(AuthError::api(503, "session endpoint unavailable"));
        }
        Ok(self.session.lock().expect("session lock poisoned").clone())
    }

    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        if self.fail_user_fetch.load(Ordering::SeqCst) {
            return Err(AuthError::api(503, "user endpoint unavailable"));
        }
        let session = self.session.lock().expect("session lock poisoned").clone();
        let Some(session) = session else {
            return Ok(None);
        };
        // Serve the account's profile rather than the session snapshot,
        // like a real backend answering GET /user.
        let accounts = self.accounts.lock().expect("accounts lock poisoned");
        let fresh = session
            .user
            .email
            .as_deref()
            .and_then(|email| accounts.get(email))
            .map(|account| account.profile.clone());
        Ok(Some(fresh.unwrap_or(session.user)))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::api(503, "logout endpoint unavailable"));
        }
        *self.session.lock().expect("session lock poisoned") = None;
        Ok(())
    }
}
