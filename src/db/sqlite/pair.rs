//! SQLite PairRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::sqlite::change_log::insert_entry;
use crate::db::{
    DbError, DbResult, DrugRef, PairAnnotation, PairFieldUpdate, PairRepository, PairSnapshot,
};

/// SQLx-backed pair repository.
pub struct SqlitePairRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> PairRepository for SqlitePairRepository<'a> {
    async fn current_pairs(&self) -> DbResult<Vec<PairSnapshot>> {
        let rows = sqlx::query(
            r#"
            SELECT p.pairid, p.genesymbol, p.pgkbcalevel, p.pgxtesting,
                   d.drugid, d.name, d.pharmgkbid
            FROM pair p
            JOIN drug d ON p.drugid = d.drugid
            WHERE p.removed = 0
            ORDER BY p.pairid
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let pairs = rows
            .into_iter()
            .map(|row| PairSnapshot {
                drug: DrugRef {
                    drugid: row.get("drugid"),
                    name: row.get("name"),
                    pharmgkbid: row.get("pharmgkbid"),
                },
                genesymbol: row.get("genesymbol"),
                pgkbcalevel: row.get("pgkbcalevel"),
                pgxtesting: row.get("pgxtesting"),
                pairid: row.get("pairid"),
            })
            .collect();

        Ok(pairs)
    }

    async fn annotation(&self, pair_id: i64) -> DbResult<PairAnnotation> {
        sqlx::query_as::<_, PairAnnotation>(
            r#"
            SELECT p.pairid, p.drugid, d.name AS drugname, p.genesymbol,
                   p.pgkbcalevel, p.pgxtesting
            FROM pair p
            JOIN drug d ON p.drugid = d.drugid
            WHERE p.pairid = ?
            "#,
        )
        .bind(pair_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            entity_type: "pair".to_string(),
            id: pair_id.to_string(),
        })
    }

    async fn apply_update(&self, update: &PairFieldUpdate) -> DbResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        // Column names come from PairField, never from input.
        let sql = format!(
            "UPDATE pair SET {} = ? WHERE pairid = ?",
            update.field.column()
        );
        let result = sqlx::query(&sql)
            .bind(&update.value)
            .bind(update.pairid)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "pair".to_string(),
                id: update.pairid.to_string(),
            });
        }

        insert_entry(&mut *tx, &update.log).await?;

        tx.commit().await.map_err(|e| DbError::Database {
            message: format!("Failed to commit: {}", e),
        })?;

        Ok(())
    }
}
