use aquatrack::{
    api::{AppState, create_router},
    config::{self, database, seed},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Connect and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed configured accounts and sessions
    seed::seed_users(&db, &app_config)
        .await
        .inspect_err(|e| error!("Failed to seed accounts: {}", e))?;

    // 6. Serve the API
    let bind_address = app_config.server.bind_address.clone();
    let state = AppState {
        db,
        config: Arc::new(app_config),
    };

    let listener = TcpListener::bind(&bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind_address, e))?;
    info!("Listening on {}", bind_address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server {
            message: e.to_string(),
        })?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
