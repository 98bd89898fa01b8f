use async_trait::async_trait;
use jiff::Timestamp;
use rangelink_core::repository::{LinkRecord, ReadRepository, Repository, Result};
use rangelink_core::{ShortCode, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::info;

const SCHEMA: &str = include_str!("../ddl/sqlite/links.sql");

/// SQLite implementation of the repository contract.
///
/// `id` is the primary key and `short_code` carries a unique constraint, so
/// both uniqueness rules are enforced by the database. `long_url` is only
/// indexed; duplicate URLs are allowed and lookups return the lowest id.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if it
    /// does not exist, and applies the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        info!(database_url, "sqlite repository ready");
        Ok(repository)
    }

    /// Creates the `links` table and its indexes if they are missing.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn to_db_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| {
        StorageError::InvalidData(format!("id {id} does not fit an sqlite integer"))
    })
}

fn parse_row(row: SqliteRow) -> Result<LinkRecord> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    let id = u64::try_from(id)
        .map_err(|_| StorageError::InvalidData(format!("negative id {id} in links table")))?;
    let short_code = ShortCode::parse(short_code)
        .map_err(|e| StorageError::InvalidData(format!("stored short code is invalid: {e}")))?;
    let created_at = Timestamp::from_second(created_at).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", created_at))
    })?;

    Ok(LinkRecord {
        id,
        long_url,
        short_code,
        created_at,
    })
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn find_by_short_code(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, long_url, short_code, created_at
            FROM links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(parse_row).transpose()
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, long_url, short_code, created_at
            FROM links
            WHERE long_url = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(parse_row).transpose()
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        let id = to_db_id(record.id)?;

        let result = sqlx::query(
            r#"
            INSERT INTO links (id, long_url, short_code, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(record.long_url)
        .bind(record.short_code.as_str())
        .bind(record.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::DuplicateKey(format!(
                "id {} / short_code {}",
                record.id, record.short_code
            ))),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
