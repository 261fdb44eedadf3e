use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::models::{Book, BookDraft};

/// Persistence seam for the book handlers.
///
/// Each handler issues exactly one call through this trait. Errors are
/// store faults only; "no such record" is expressed through `Option`/`bool`.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Prepare the backing collection. Called once from module init.
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Book>>;

    async fn find_all(&self) -> anyhow::Result<Vec<Book>>;

    /// Persist a new record and return its generated identifier.
    async fn create(&self, draft: BookDraft) -> anyhow::Result<ObjectId>;

    /// Returns `false` when nothing matched `id`.
    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool>;

    /// Replace all four fields and return the record as stored afterwards.
    async fn replace(&self, id: ObjectId, draft: BookDraft) -> anyhow::Result<Option<Book>>;
}
