use mongodb::{bson::doc, Client as MongoClient, Database};
use service_core::error::AppError;

/// Handle to the configured MongoDB deployment.
///
/// The catalog never reads from it; the connection is held for health
/// reporting and closed on shutdown.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    /// Close pooled connections. Waits for outstanding operations to finish.
    pub async fn shutdown(self) {
        tracing::info!(database = %self.db.name(), "Closing MongoDB client");
        self.client.shutdown().await;
    }
}
