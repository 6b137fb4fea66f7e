//! CLI entry point for Latchkey.

use clap::{Parser, Subcommand};

use crate::config::LatchkeyConfig;
use crate::service::AuthService;

/// Latchkey auth CLI
#[derive(Parser, Debug)]
#[command(name = "latchkey", version, about = "Latchkey — auth client CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login(LoginArgs),
    /// Register a new account
    Signup(SignupArgs),
}

/// Arguments for `latchkey login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account email address
    pub email: String,
    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for `latchkey signup`.
#[derive(Parser, Debug)]
pub struct SignupArgs {
    /// Account email address
    pub email: String,
    /// Account password
    #[arg(short, long)]
    pub password: String,
    /// Display name stored on the profile
    #[arg(short, long)]
    pub first_name: String,
}

/// Handle `latchkey login`.
pub async fn handle_login(args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    require_non_empty("email", &args.email)?;
    require_non_empty("password", &args.password)?;

    let service = connect()?;
    let session = service.login(&args.email, &args.password).await?;
    greet(&service, session.user.first_name()).await;
    Ok(())
}

/// Handle `latchkey signup`.
pub async fn handle_signup(args: SignupArgs) -> Result<(), Box<dyn std::error::Error>> {
    require_non_empty("email", &args.email)?;
    require_non_empty("password", &args.password)?;
    require_non_empty("first name", &args.first_name)?;

    let service = connect()?;
    let session = service
        .sign_up(&args.email, &args.password, &args.first_name)
        .await?;
    println!("✅ Account created for {}", args.email);
    greet(&service, session.user.first_name()).await;
    Ok(())
}

fn connect() -> Result<AuthService, Box<dyn std::error::Error>> {
    let config = LatchkeyConfig::from_env()?;
    Ok(AuthService::gotrue(&config)?)
}

fn require_non_empty(field: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty").into());
    }
    Ok(())
}

async fn greet(service: &AuthService, fallback_name: Option<&str>) {
    // Fresh profile read exercises the full round trip; fall back to the
    // session's snapshot if the fetch fails.
    let name = match service.current_user().await {
        Some(user) => user.first_name().unwrap_or("there").to_string(),
        None => fallback_name.unwrap_or("there").to_string(),
    };
    println!("👋 Welcome, {name}!");
}
