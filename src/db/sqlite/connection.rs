//! SQLite connection pool and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::{
    SqliteAlleleRepository, SqliteChangeLogRepository, SqliteGuidelineRepository,
    SqlitePairRepository, SqlitePhenotypeRepository,
};
use crate::db::{Database, DbError, DbResult};

// Light fan-out only: one round-trip per gene or drug, plus batched pair updates.
const MAX_CONNECTIONS: u32 = 5;

/// SQLite database implementation.
///
/// Created once by the entry point and handed to each job; call
/// [`SqliteDatabase::close`] to release the pool.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: format!("{}: {}", path.as_ref().display(), e),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Each in-memory connection is its own database, so the pool is pinned
    /// to a single connection.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Underlying pool, for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Alleles<'a> = SqliteAlleleRepository<'a>;
    type Phenotypes<'a> = SqlitePhenotypeRepository<'a>;
    type Guidelines<'a> = SqliteGuidelineRepository<'a>;
    type Pairs<'a> = SqlitePairRepository<'a>;
    type ChangeLog<'a> = SqliteChangeLogRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./data/sql/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn alleles(&self) -> Self::Alleles<'_> {
        SqliteAlleleRepository { pool: &self.pool }
    }

    fn phenotypes(&self) -> Self::Phenotypes<'_> {
        SqlitePhenotypeRepository { pool: &self.pool }
    }

    fn guidelines(&self) -> Self::Guidelines<'_> {
        SqliteGuidelineRepository { pool: &self.pool }
    }

    fn pairs(&self) -> Self::Pairs<'_> {
        SqlitePairRepository { pool: &self.pool }
    }

    fn change_log(&self) -> Self::ChangeLog<'_> {
        SqliteChangeLogRepository { pool: &self.pool }
    }
}
