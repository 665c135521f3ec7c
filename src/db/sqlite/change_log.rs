//! SQLite ChangeLogRepository implementation.

use sqlx::{SqliteConnection, SqlitePool};

use crate::db::{ChangeLogEntry, ChangeLogRepository, DbResult, NewChangeLogEntry};

/// SQLx-backed change log.
pub struct SqliteChangeLogRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ChangeLogRepository for SqliteChangeLogRepository<'a> {
    async fn list(&self) -> DbResult<Vec<ChangeLogEntry>> {
        let entries = sqlx::query_as::<_, ChangeLogEntry>(
            r#"
            SELECT date, type, entityname, note
            FROM change_log_view
            ORDER BY date DESC, type, entityname, note
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}

/// Insert one entry on an open connection, usually inside the transaction
/// that made the change.
pub(crate) async fn insert_entry(
    conn: &mut SqliteConnection,
    entry: &NewChangeLogEntry,
) -> DbResult<()> {
    sqlx::query("INSERT INTO change_log (date, type, entityid, note) VALUES (?, ?, ?, ?)")
        .bind(entry.date)
        .bind(&entry.change_type)
        .bind(&entry.entity_id)
        .bind(&entry.note)
        .execute(conn)
        .await?;

    Ok(())
}
