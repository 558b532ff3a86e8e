use std::time::Duration;

use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::error::AppError;

/// Owner of the MongoDB client for the lifetime of the process.
///
/// Created once at startup and shut down explicitly once the server stops.
pub struct MongoConnection {
    client: Client,
    database: Database,
}

impl MongoConnection {
    /// Connect and verify the deployment answers a `ping` within `ping_timeout`.
    pub async fn connect(
        uri: &str,
        db_name: &str,
        ping_timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Database(format!("connect failed: {e}")))?;
        let database = client.database(db_name);

        let connection = Self { client, database };
        connection.ping(ping_timeout).await?;
        Ok(connection)
    }

    /// Connectivity check bounded by `timeout`.
    pub async fn ping(&self, timeout: Duration) -> Result<(), AppError> {
        let ping = async { self.database.run_command(doc! { "ping": 1 }).await };
        match tokio::time::timeout(timeout, ping).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(AppError::Database(format!("ping failed: {e}"))),
            Err(_) => Err(AppError::Timeout(format!("ping exceeded {timeout:?}"))),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Close all pooled connections.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}
