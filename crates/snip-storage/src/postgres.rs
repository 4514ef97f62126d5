use async_trait::async_trait;
use jiff::Timestamp;
use snip_core::repository::Result;
use snip_core::{NewRecord, Repository, ShortCode, StorageError, UrlRecord};
use sqlx::{PgPool, Row};
use tracing::trace;

/// Schema for the `urls` table.
pub const SCHEMA: &str = include_str!("../ddl/postgres/urls.sql");

/// PostgreSQL implementation of the repository contract.
///
/// `short_code` carries a unique constraint, which is what turns a random
/// collision into [`StorageError::DuplicateCode`]. Timestamps are exchanged
/// with the database as microseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository from an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `urls` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{micros}': {e}"))
    })
}

fn parse_visit_count(raw: i64) -> Result<u64> {
    u64::try_from(raw)
        .map_err(|_| StorageError::InvalidData(format!("negative visit_count '{raw}'")))
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
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn put(&self, record: &NewRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, visit_count)
            VALUES ($1, $2, to_timestamp($3::double precision / 1000000), 0)
            "#,
        )
        .bind(record.code.as_str())
        .bind(&record.original_url)
        .bind(record.created_at.as_microsecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                trace!(code = %record.code, "Inserted record");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::DuplicateCode(record.code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT original_url,
                   (EXTRACT(EPOCH FROM created_at) * 1000000)::BIGINT AS created_at_us,
                   visit_count
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at_us").map_err(map_sqlx_error)?;
        let visit_count: i64 = row.try_get("visit_count").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord {
            code: code.clone(),
            original_url,
            created_at: parse_created_at(created_at)?,
            visit_count: parse_visit_count(visit_count)?,
        }))
    }

    async fn increment_visit_count(&self, code: &ShortCode) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE urls
            SET visit_count = visit_count + 1
            WHERE short_code = $1
            "#,
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
