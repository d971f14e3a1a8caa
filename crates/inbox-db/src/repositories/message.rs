//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use inbox_core::{Message, MessageId, MessageRepository, MessageStats, RepoResult};

use crate::mappers::MessageInsert;
use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
///
/// Each lifecycle transition is a single `UPDATE ... RETURNING` statement,
/// so concurrent transitions on one id are last-write-wins.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, used for readiness checks
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn insert(&self, message: &Message) -> RepoResult<()> {
        let row = MessageInsert::new(message);

        sqlx::query(
            r#"
            INSERT INTO contact_messages
                (id, name, email, phone, subject, message, created_at, deleted, deleted_at, deleted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.email)
        .bind(row.phone)
        .bind(row.subject)
        .bind(row.message)
        .bind(row.created_at)
        .bind(row.deleted)
        .bind(row.deleted_at)
        .bind(row.deleted_by)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, name, email, phone, subject, message, created_at, deleted, deleted_at, deleted_by
            FROM contact_messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, name, email, phone, subject, message, created_at, deleted, deleted_at, deleted_by
            FROM contact_messages
            WHERE deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_deleted(&self) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, name, email, phone, subject, message, created_at, deleted, deleted_at, deleted_by
            FROM contact_messages
            WHERE deleted = TRUE
            ORDER BY deleted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_deleted(
        &self,
        id: MessageId,
        deleted_at: DateTime<Utc>,
        deleted_by: Option<&str>,
    ) -> RepoResult<Option<Message>> {
        let deleted_by = deleted_by.map(str::trim).filter(|by| !by.is_empty());

        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            UPDATE contact_messages
            SET deleted = TRUE, deleted_at = $2, deleted_by = $3
            WHERE id = $1
            RETURNING id, name, email, phone, subject, message, created_at, deleted, deleted_at, deleted_by
            "#,
        )
        .bind(id.into_inner())
        .bind(deleted_at)
        .bind(deleted_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn mark_restored(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            UPDATE contact_messages
            SET deleted = FALSE, deleted_at = NULL, deleted_by = NULL
            WHERE id = $1
            RETURNING id, name, email, phone, subject, message, created_at, deleted, deleted_at, deleted_by
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn purge(&self, id: MessageId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_state(&self) -> RepoResult<MessageStats> {
        let (active, trashed) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE deleted = FALSE),
                COUNT(*) FILTER (WHERE deleted = TRUE)
            FROM contact_messages
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(MessageStats { active, trashed })
    }
}
