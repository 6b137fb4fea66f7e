//! Convenience re-exports for common use.

pub use crate::config::LatchkeyConfig;
pub use crate::error::{AuthError, Result};
pub use crate::provider::{AuthProvider, GotrueClient};
pub use crate::service::AuthService;
pub use crate::types::{Session, UserProfile};
