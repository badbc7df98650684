//! roster-api — HTTP API server for the generus roster dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_api::{app, AppState, FeatureFlags, SessionKey};
use roster_core::defaults::{CORS_MAX_AGE_SECS, SERVER_PORT};
use roster_core::{ConfigStore, RecordStore};
use roster_sheets::{SheetsClient, SheetsDatabase};

/// Parse the CORS origin whitelist from `ROSTER_ALLOWED_ORIGINS`
/// (comma-separated). Cookies require explicit origins, not a wildcard.
fn parse_allowed_origins() -> Vec<HeaderValue> {
    std::env::var("ROSTER_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT - "json" or "text" (default: "text")
    //   LOG_FILE   - path to log file (optional, enables daily-rotated file logging)
    //   RUST_LOG   - standard env filter (default: "roster_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roster_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("roster-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false), // no ANSI in files
                )
                .init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
        None
    };

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| SERVER_PORT.to_string())
        .parse()
        .unwrap_or(SERVER_PORT);

    let session_key = match std::env::var("ROSTER_SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => SessionKey::from_secret(&secret),
        _ => {
            warn!("ROSTER_SESSION_SECRET not set; sessions will not survive a restart");
            let random: [u8; 32] = rand::random();
            SessionKey::from_secret(&hex::encode(random))
        }
    };

    info!("Connecting to spreadsheet backend...");
    let client = Arc::new(SheetsClient::from_env()?);
    let db = SheetsDatabase::with_client(client);
    let store: Arc<dyn RecordStore> = Arc::new(db.records);
    let config: Arc<dyn ConfigStore> = Arc::new(db.config);

    let state = AppState::new(store, config, session_key)
        .with_flags(FeatureFlags::from_env())
        .with_thresholds(roster_core::JenjangThresholds::from_env())
        .with_default_login_rate_limit();

    let app = app(state).layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parse_allowed_origins()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(CORS_MAX_AGE_SECS)),
    );

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
