use crate::adapters::database::DbPool;
use crate::adapters::database::message_repo::MessageRepository;
use crate::domain::message::{Message, NewMessage};
use crate::error::Result;
use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) created_total: Counter<u64>,
    pub(crate) deleted_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("message-store");
        Self {
            created_total: meter
                .u64_counter("message_store_messages_created_total")
                .with_description("Total message create attempts")
                .build(),
            deleted_total: meter
                .u64_counter("message_store_messages_deleted_total")
                .with_description("Total message delete attempts")
                .build(),
        }
    }
}

/// Storage operations for messages.
///
/// Every call checks out its own connection from the pool and returns it when
/// the call finishes, whether it succeeded or not. Each statement commits on
/// its own; there is no transaction spanning calls.
#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    repo: MessageRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(pool: DbPool, repo: MessageRepository) -> Self {
        Self { pool, repo, metrics: Metrics::new() }
    }

    /// Stores a new message.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the message cannot be stored.
    #[tracing::instrument(err(level = "warn"), skip(self, message))]
    pub async fn create(&self, message: NewMessage) -> Result<Message> {
        let result = async {
            let mut conn = self.pool.acquire().await?;
            self.repo.create(&mut conn, &message).await
        }
        .await;

        match result {
            Ok(created) => {
                tracing::debug!(message_id = created.id, "Message stored");
                self.metrics.created_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(created)
            }
            Err(e) => {
                self.metrics.created_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e)
            }
        }
    }

    /// Looks up a message by id. A missing message is `Ok(None)`.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(err(level = "warn"), skip(self), fields(message_id = %id))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Message>> {
        let mut conn = self.pool.acquire().await?;
        self.repo.find_by_id(&mut conn, id).await
    }

    /// Returns every stored message.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Message>> {
        let mut conn = self.pool.acquire().await?;
        let messages = self.repo.list_all(&mut conn).await?;
        tracing::debug!(count = messages.len(), "Listed messages");
        Ok(messages)
    }

    /// Deletes a message. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the deletion fails.
    #[tracing::instrument(err(level = "warn"), skip(self), fields(message_id = %id))]
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = async {
            let mut conn = self.pool.acquire().await?;
            self.repo.delete_by_id(&mut conn, id).await
        }
        .await;

        match result {
            Ok(true) => {
                self.metrics.deleted_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(true)
            }
            Ok(false) => {
                self.metrics.deleted_total.add(1, &[KeyValue::new("status", "not_found")]);
                Ok(false)
            }
            Err(e) => {
                self.metrics.deleted_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e)
            }
        }
    }
}
