use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::db::models::{Document, DocumentStatus};
use crate::error::AppError;

/// Repository trait for document operations.
///
/// This trait allows mocking the database layer in tests. Every call is
/// bounded by a deadline in the real implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// All documents, or only those whose status equals `status`, in natural order.
    async fn find(&self, status: Option<DocumentStatus>) -> Result<Vec<Document>, AppError>;

    /// Move every document whose id is in `ids` *and* whose status is still
    /// `Pending` to `target`, in one atomic conditional update.
    ///
    /// Documents that are already decided or do not exist are skipped.
    /// Returns the number of documents actually modified.
    async fn decide_pending(
        &self,
        ids: &[ObjectId],
        target: DocumentStatus,
        reason: &str,
        decided_at: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Insert documents, returning how many were inserted.
    async fn insert_many(&self, docs: Vec<Document>) -> Result<u64, AppError>;

    /// Wipe the whole collection, returning how many documents were removed.
    async fn delete_all(&self) -> Result<u64, AppError>;
}

/// MongoDB implementation of the DocumentRepository.
///
/// Only available when the `server` feature is enabled.
#[cfg(feature = "server")]
pub struct MongoDocumentRepository {
    collection: mongodb::Collection<Document>,
    op_timeout: std::time::Duration,
}

#[cfg(feature = "server")]
impl MongoDocumentRepository {
    pub const COLLECTION: &'static str = "documents";

    pub fn new(db: &mongodb::Database, op_timeout: std::time::Duration) -> Self {
        Self {
            collection: db.collection(Self::COLLECTION),
            op_timeout,
        }
    }

    /// Run a store operation under the configured deadline.
    async fn with_deadline<T, F>(&self, op: &str, fut: F) -> Result<T, AppError>
    where
        F: std::future::Future<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(|e| AppError::Database(format!("{op} failed: {e}"))),
            Err(_) => Err(AppError::Timeout(format!("{op} exceeded {:?}", self.op_timeout))),
        }
    }
}

#[cfg(feature = "server")]
#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn find(&self, status: Option<DocumentStatus>) -> Result<Vec<Document>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let filter = match status {
            Some(status) => doc! { "status": status.as_str() },
            None => doc! {},
        };

        self.with_deadline("find", async {
            let cursor = self.collection.find(filter).await?;
            cursor.try_collect::<Vec<Document>>().await
        })
        .await
    }

    async fn decide_pending(
        &self,
        ids: &[ObjectId],
        target: DocumentStatus,
        reason: &str,
        decided_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        use mongodb::bson::{doc, DateTime as BsonDateTime};

        // Eligibility and mutation in one filter: no read-before-write.
        let filter = doc! {
            "_id": { "$in": ids.to_vec() },
            "status": DocumentStatus::Pending.as_str(),
        };
        let update = doc! {
            "$set": {
                "status": target.as_str(),
                "reason": reason,
                "updated_at": BsonDateTime::from_chrono(decided_at),
            }
        };

        let result = self
            .with_deadline("update_many", async {
                self.collection.update_many(filter, update).await
            })
            .await?;

        Ok(result.modified_count)
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<u64, AppError> {
        if docs.is_empty() {
            return Ok(0);
        }

        let result = self
            .with_deadline("insert_many", async {
                self.collection.insert_many(docs).await
            })
            .await?;

        Ok(result.inserted_ids.len() as u64)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        let result = self
            .with_deadline("delete_many", async {
                self.collection.delete_many(doc! {}).await
            })
            .await?;

        Ok(result.deleted_count)
    }
}
