//! Offline Credential Import
//!
//! One-time migration utility for accounts coming from an older deployment
//! that kept plaintext passwords. The server itself only ever accepts
//! pre-hashed storage; this tool is the single place plaintext is read,
//! and it runs entirely outside the request path.
//!
//! Usage:
//!   import-users <accounts.json>
//!
//! where the file is a JSON array of
//!   { "username": "...", "password": "...", "role": "member" }
//! entries (role optional, defaults to member). Existing usernames are
//! skipped, never overwritten.

use std::env;

use anyhow::Context;
use serde::Deserialize;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::domain::repository::UserRepository as _;
use auth::models::{User, UserName, UserRole};
use auth::{AuthError, SqliteUserRepository};
use platform::password::ClearTextPassword;

#[derive(Debug, Deserialize)]
struct ImportEntry {
    username: String,
    password: String,
    role: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "import_users=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = env::args()
        .nth(1)
        .context("usage: import-users <accounts.json>")?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {path}"))?;
    let entries: Vec<ImportEntry> =
        serde_json::from_str(&raw).context("accounts file is not a JSON array of entries")?;

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
        std::fs::create_dir_all("data").ok();
        "sqlite:data/hackathons.db?mode=rwc".to_string()
    });

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .map(|b64| {
            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(b64)
                .context("PASSWORD_PEPPER is not valid base64")
        })
        .transpose()?;

    let users = SqliteUserRepository::new(pool);
    let importer = UserName::new("import").expect("static name");

    let mut imported = 0u32;
    let mut skipped = 0u32;

    for entry in entries {
        let username = match UserName::new(entry.username.clone()) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(username = %entry.username, error = %e, "Skipping invalid username");
                skipped += 1;
                continue;
            }
        };

        let role = match entry.role.as_deref() {
            None => UserRole::Member,
            Some(code) => match UserRole::from_code(code) {
                Some(role) => role,
                None => {
                    tracing::warn!(username = %username, role = code, "Skipping unknown role");
                    skipped += 1;
                    continue;
                }
            },
        };

        let password_hash = match ClearTextPassword::new(entry.password) {
            Ok(password) => password.hash(pepper.as_deref())?,
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Skipping invalid password");
                skipped += 1;
                continue;
            }
        };

        let user = User::created_by_admin(username.clone(), password_hash, role, &importer);
        match users.create(&user).await {
            Ok(()) => {
                tracing::info!(username = %username, role = %role, "Imported account");
                imported += 1;
            }
            Err(AuthError::UserNameTaken) => {
                tracing::warn!(username = %username, "Account already exists, skipping");
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(imported, skipped, "Credential import complete");
    Ok(())
}
