use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use docflow::app::AppState;
use docflow::config::AppConfig;
use docflow::db::connection::MongoConnection;
use docflow::db::repository::{DocumentRepository, MongoDocumentRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docflow=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting docflow server...");

    let config = AppConfig::load().context("failed to load configuration (is MONGODB_URI set?)")?;

    // Connect to MongoDB; the process cannot serve anything without it.
    let connection = MongoConnection::connect(
        &config.mongodb_uri,
        &config.db_name,
        config.ping_timeout(),
    )
    .await
    .context("failed to connect to MongoDB")?;

    tracing::info!("Connected to MongoDB at {}", config.redacted_target());

    let document_repo: Arc<dyn DocumentRepository> = Arc::new(MongoDocumentRepository::new(
        connection.database(),
        config.query_timeout(),
    ));

    let app = docflow::api::app(AppState::new(document_repo), &config.cors_allowed_origin)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    connection.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
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

    tracing::info!("Shutdown signal received");
}
