//! Rescroll auth service entry point

use rescroll_auth::{
    auth::{cookies::SessionCookies, jwt::JwtService, password::PasswordHasher},
    config::AppConfig,
    db,
    middleware::AppState,
    repository::PgCredentialStore,
    routes,
    services::AuthService,
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("rescroll-auth {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // Load .env files in development. Production sets environment
    // variables directly.
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    // 1. Configuration. Missing or invalid secrets are fatal here, before
    // anything binds a port.
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {e}");
        anyhow::anyhow!("Failed to load configuration: {e}")
    })?;

    // 2. Logging
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Rescroll auth starting...");

    // 3. Database pool + migrations
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. Application state
    let jwt_service = Arc::new(JwtService::from_config(&config.security)?);
    let cookies = SessionCookies::new(
        &config.cookies,
        jwt_service.access_ttl_secs(),
        jwt_service.refresh_ttl_secs(),
    )?;
    let store = Arc::new(PgCredentialStore::new(db_pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        store.clone(),
        jwt_service.clone(),
        Arc::new(PasswordHasher::new()),
    ));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        auth_service,
        jwt_service,
        cookies,
    });

    // 5. Routes
    let app = routes::create_router(app_state);

    // 6. Serve
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handling
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
    tracing::warn!("Graceful shutdown timeout reached, forcing exit");
}

fn print_help() {
    println!("rescroll-auth {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: rescroll-auth [options]");
    println!();
    println!("Options:");
    println!("  --version     Print version and exit");
    println!("  --help        Print this help and exit");
    println!();
    println!("Environment variables:");
    println!("  All configuration is environment-driven with the RESCROLL_ prefix.");
    println!("  RESCROLL_SECURITY__ACCESS_TOKEN_SECRET and");
    println!("  RESCROLL_SECURITY__REFRESH_TOKEN_SECRET are required.");
}
