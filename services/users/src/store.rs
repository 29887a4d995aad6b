use async_trait::async_trait;
use models::User;
use sqlx::{Pool, Postgres, Row};

/// Mechanical persistence failures. The store never interprets domain
/// meaning; the workflow decides what a duplicate or a missing row implies.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The insert completed but no generated id came back. This violates a
    /// store-level invariant and is treated as fatal by callers.
    #[error("insert returned no generated id")]
    MissingGeneratedId,
    /// The `users.person_id` unique constraint rejected an insert.
    #[error("person id is already bound to an existing user")]
    DuplicatePersonId,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence port for user rows. One implementation talks to Postgres;
/// tests substitute an in-memory one.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a row and return the store-generated id.
    async fn insert(
        &self,
        name: &str,
        surname: &str,
        person_id: &str,
        uuid: &str,
    ) -> Result<i64, StoreError>;

    /// `None` for a missing row, never an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// All rows, in store-defined (unordered) sequence.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// Unconditional update by id; a missing id is a no-op. Existence is the
    /// workflow's concern.
    async fn update(&self, id: i64, name: &str, surname: &str) -> Result<(), StoreError>;

    /// Unconditional delete by id; a missing id is a no-op.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn exists_by_person_id(&self, person_id: &str) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool<Postgres>,
}

impl PgUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(
        &self,
        name: &str,
        surname: &str,
        person_id: &str,
        uuid: &str,
    ) -> Result<i64, StoreError> {
        tracing::debug!(%person_id, %uuid, "inserting user row");

        let row = sqlx::query(
            r#"INSERT INTO users (name, surname, person_id, uuid) VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(name)
        .bind(surname)
        .bind(person_id)
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicatePersonId,
            _ => StoreError::Database(err),
        })?;

        let id: i64 = row.ok_or(StoreError::MissingGeneratedId)?.try_get("id")?;
        tracing::debug!(id, "user row inserted");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        tracing::debug!(id, "querying user by id");

        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, surname, person_id, uuid FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        tracing::debug!("querying all users");

        // No ORDER BY: row order is whatever the store hands back.
        let users = sqlx::query_as::<_, User>(
            r#"SELECT id, name, surname, person_id, uuid FROM users"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update(&self, id: i64, name: &str, surname: &str) -> Result<(), StoreError> {
        tracing::debug!(id, "updating user row");

        sqlx::query(r#"UPDATE users SET name = $2, surname = $3 WHERE id = $1"#)
            .bind(id)
            .bind(name)
            .bind(surname)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        tracing::debug!(id, "deleting user row");

        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn exists_by_person_id(&self, person_id: &str) -> Result<bool, StoreError> {
        tracing::debug!(%person_id, "checking person id existence");

        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE person_id = $1)"#,
        )
        .bind(person_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
