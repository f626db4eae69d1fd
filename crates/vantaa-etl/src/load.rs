// Destination Table Writer

use crate::transform::JobPosting;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use std::time::Duration;
use tracing::info;
use vantaa_common::Result;

/// Destination table for the city's open job applications
pub const TABLE_NAME: &str = "vantaa_open_applications";

/// Rows per INSERT statement
pub const DEFAULT_INSERT_CHUNK_SIZE: usize = 500;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS vantaa_open_applications (
    id TEXT PRIMARY KEY,
    field TEXT,
    job_title TEXT,
    job_key TEXT,
    address TEXT,
    application_end_date DATE,
    longitude_wgs84 DOUBLE PRECISION,
    latitude_wgs84 DOUBLE PRECISION,
    link TEXT
)
"#;

/// Connect to the destination database.
///
/// The pool is sized for a single sequential load; there is no cross-run
/// connection reuse.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Create the destination schema when absent. Safe to call repeatedly.
pub async fn initialize_database(database_url: &str) -> Result<()> {
    let pool = connect(database_url).await?;
    Loader::new(pool).ensure_table().await
}

/// Writes canonical records into the destination table
pub struct Loader {
    db: PgPool,
    chunk_size: usize,
}

impl Loader {
    /// Create a new loader with the default chunk size
    pub fn new(db: PgPool) -> Self {
        Loader {
            db,
            chunk_size: DEFAULT_INSERT_CHUNK_SIZE,
        }
    }

    /// Create a loader with a custom chunk size
    pub fn with_chunk_size(db: PgPool, chunk_size: usize) -> Self {
        Loader { db, chunk_size }
    }

    /// Create the destination table when absent. Idempotent: re-running
    /// against an existing table with the same shape does not raise.
    pub async fn ensure_table(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.db).await?;
        Ok(())
    }

    /// Replace the table contents with `postings` in one transaction.
    ///
    /// An empty batch performs no writes at all and returns 0: prior rows
    /// are left in place, not cleared. Callers that want a truly empty
    /// table must truncate it themselves.
    pub async fn load(&self, postings: &[JobPosting]) -> Result<usize> {
        if postings.is_empty() {
            info!("Empty batch, nothing to load");
            return Ok(0);
        }

        self.ensure_table().await?;

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM vantaa_open_applications")
            .execute(&mut *tx)
            .await?;

        for chunk in postings.chunks(self.chunk_size) {
            let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO vantaa_open_applications (
                    id, field, job_title, job_key, address,
                    application_end_date, longitude_wgs84, latitude_wgs84, link
                ) ",
            );

            query_builder.push_values(chunk, |mut b, posting| {
                b.push_bind(&posting.id)
                    .push_bind(posting.field.as_deref())
                    .push_bind(posting.job_title.as_deref())
                    .push_bind(posting.job_key.as_deref())
                    .push_bind(posting.address.as_deref())
                    .push_bind(posting.application_end_date)
                    .push_bind(posting.longitude_wgs84)
                    .push_bind(posting.latitude_wgs84)
                    .push_bind(posting.link.as_deref());
            });

            query_builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        info!("Loaded {} postings into {}", postings.len(), TABLE_NAME);

        Ok(postings.len())
    }

    /// Get the database connection pool
    pub fn db(&self) -> &PgPool {
        &self.db
    }
}

// ============================================================================
// Tests
// ============================================================================
