//! Latchkey — email/password auth client for GoTrue-compatible backends.
//!
//! Wraps a GoTrue-style auth server (Supabase Auth and friends) behind a
//! small session facade: login, sign-up, session probe, sign-out, and
//! current-user lookup. The provider client owns the session in memory;
//! nothing is persisted.
//!
//! # Quick Start
//!
//! ```no_run
//! use latchkey::prelude::*;
//!
//! # async fn example() -> latchkey::error::Result<()> {
//! let config = LatchkeyConfig::from_env()?;
//! let auth = AuthService::gotrue(&config)?;
//! let session = auth.login("ada@example.com", "hunter2").await?;
//! println!("hello, {}", session.user.first_name().unwrap_or("stranger"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod service;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
