use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Connection, PgPool, Row};
use thiserror::Error;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// A row from the `users` table. Never serialized as-is: the password hash
/// must not reach any outward-facing payload.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// Unique constraint on `users.username` rejected the write.
    #[error("username already taken")]
    UniqueViolation,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for the flows; handlers get an `Arc<dyn UserStore>` so
/// tests can substitute an in-memory store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Liveness check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &PgRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
        password_hash: row.get("password"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let query =
            "SELECT id, name, username, password, created_at, updated_at FROM users WHERE username = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let query =
            "SELECT id, name, username, password, created_at, updated_at FROM users WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let query = r"
            INSERT INTO users (name, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, username, password, created_at, updated_at
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.username)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::UniqueViolation
                } else {
                    StoreError::Database(err)
                }
            })?;

        Ok(record_from_row(&row))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(span).await?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;

        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::sync::Mutex;

    /// In-memory store with the same uniqueness semantics as the schema.
    #[derive(Default)]
    pub struct MemoryStore {
        users: Mutex<Vec<UserRecord>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserRecord>, StoreError> {
            let users = self.users.lock().await;
            Ok(users.iter().find(|user| user.username == username).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
            let users = self.users.lock().await;
            Ok(users.iter().find(|user| user.id == id).cloned())
        }

        async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
            let mut users = self.users.lock().await;
            if users.iter().any(|existing| existing.username == user.username) {
                return Err(StoreError::UniqueViolation);
            }

            let now = Utc::now();
            let record = UserRecord {
                id: Uuid::new_v4(),
                name: user.name,
                username: user.username,
                password_hash: user.password_hash,
                created_at: now,
                updated_at: now,
            };
            users.push(record.clone());

            Ok(record)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Store whose every call fails, for exercising the sanitized error path.
    pub struct FailingStore;

    #[async_trait]
    impl UserStore for FailingStore {
        async fn find_by_username(&self, _: &str) -> Result<Option<UserRecord>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn find_by_id(&self, _: Uuid) -> Result<Option<UserRecord>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn insert(&self, _: NewUser) -> Result<UserRecord, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }
}
