//! Access Control Platform Server
//!
//! Serves the organization, user, role, right and record APIs plus
//! health probes and Swagger UI at `/docs`.
//!
//! ## Configuration
//!
//! Read from a TOML file (see `ac_config::ConfigLoader` for the search
//! order) with `ACCESS_*` environment overrides:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ACCESS_HTTP_HOST` | `0.0.0.0` | Bind address |
//! | `ACCESS_HTTP_PORT` | `8000` | HTTP port |
//! | `ACCESS_CORS_ORIGINS` | `http://localhost:3000` | Comma-separated or JSON list, `*` for any |
//! | `ACCESS_DATABASE_URL` | `sqlite://access-control.db` | sqlx SQLite URL |
//! | `ACCESS_DEV_MODE` | `false` | Seed sample data |
//! | `RUST_LOG` | `info` | Log level |
//! | `LOG_FORMAT` | text | `json` for JSON lines |

use ac_config::{AppConfig, ConfigLoader};
use ac_platform::{
    build_router, Argon2Config, Database, DevDataSeeder, HealthState, PasswordPolicy,
    PasswordService, PlatformServices,
};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    ac_common::logging::init_logging("ac-platform-server");

    info!("Starting Access Control Platform Server");

    let config_path = std::env::args().nth(1);
    let loader = match &config_path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load().context("Failed to load configuration")?;

    info!(url = %config.database.url, "Connecting to database");
    let db = Database::connect(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;
    db.init_schema().await.context("Failed to initialize schema")?;

    let passwords = PasswordService::new(
        Argon2Config::default(),
        PasswordPolicy::lenient().with_min_length(config.security.password_min_length),
    )?;
    let services = PlatformServices::new(db.clone(), passwords);

    if config.dev_mode {
        let seeder = DevDataSeeder::new(services.clone());
        if let Err(e) = seeder.seed().await {
            warn!(error = %e, "Dev data seeding failed");
        }
    }

    let health = HealthState::new(db.clone(), Some(env!("CARGO_PKG_VERSION").to_string()));
    let app = build_router(&services, health.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    health.set_ready();
    info!("API listening on http://{} (docs at /docs)", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Access Control Platform Server shutdown complete");
    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = &config.http.cors_origins;
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
