//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors resolve through
//! `kernel::error::AppError` at the handler boundary.

use axum::http::{self, Method, header};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::domain::repository::UserRepository as _;
use auth::models::{User, UserName, UserRole};
use auth::{AuthConfig, SqliteUserRepository};
use platform::password::ClearTextPassword;

mod app;

use app::build_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,events=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
        // Default to a file next to the binary's working directory
        std::fs::create_dir_all("data").ok();
        "sqlite:data/hackathons.db?mode=rwc".to_string()
    });

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::with_random_secret()
    } else {
        // In production, load the secret from the environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            ..AuthConfig::default()
        }
    };

    if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?);
    }

    // Startup bootstrap: registration can never mint an admin, so an empty
    // store gets one from the environment. Never overwrites existing data.
    bootstrap_admin(&pool, &config).await?;

    // CORS configuration
    let cors = match env::var("FRONTEND_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<http::HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(AllowMethods::list([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]))
                .allow_headers(AllowHeaders::list([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                ]))
        }
        // Tokens travel in the Authorization header, never in cookies, so
        // an open CORS default carries no ambient credentials
        Err(_) => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    // Build router
    let app = build_app(pool, config)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the initial admin when the user table is empty
async fn bootstrap_admin(pool: &sqlx::SqlitePool, config: &AuthConfig) -> anyhow::Result<()> {
    let users = SqliteUserRepository::new(pool.clone());

    if users.count().await? > 0 {
        return Ok(());
    }

    let (username, password) = match (
        env::var("BOOTSTRAP_ADMIN_USERNAME"),
        env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) {
        (Ok(u), Ok(p)) => (u, p),
        _ => {
            tracing::warn!(
                "No accounts exist; set BOOTSTRAP_ADMIN_USERNAME and \
                 BOOTSTRAP_ADMIN_PASSWORD to create the initial admin"
            );
            return Ok(());
        }
    };

    let username = UserName::new(username)
        .map_err(|e| anyhow::anyhow!("invalid bootstrap username: {e}"))?;
    let password_hash = ClearTextPassword::new(password)
        .map_err(|e| anyhow::anyhow!("invalid bootstrap password: {e}"))?
        .hash(config.pepper())?;

    let system = UserName::new("system").expect("static name");
    let admin = User::created_by_admin(username.clone(), password_hash, UserRole::Admin, &system);
    users.create(&admin).await?;

    tracing::info!(username = %username, "Bootstrapped initial admin account");
    Ok(())
}
