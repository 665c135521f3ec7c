//! SQLite PhenotypeRepository implementation.

use sqlx::SqlitePool;

use super::allele::denylist_json;
use crate::db::{AlleleFunction, DbResult, Diplotype, PhenotypeRepository};

/// SQLx-backed gene phenotype queries.
pub struct SqlitePhenotypeRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> PhenotypeRepository for SqlitePhenotypeRepository<'a> {
    async fn genes_with_alleles(&self, denylist: &[&str]) -> DbResult<Vec<String>> {
        let genes: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT genesymbol FROM allele
            WHERE genesymbol NOT IN (SELECT value FROM json_each(?))
            ORDER BY 1
            "#,
        )
        .bind(denylist_json(denylist)?)
        .fetch_all(self.pool)
        .await?;

        Ok(genes)
    }

    async fn allele_functions(&self, gene: &str) -> DbResult<Vec<AlleleFunction>> {
        let functions = sqlx::query_as::<_, AlleleFunction>(
            r#"
            SELECT name, clinicalfunctionalstatus, activityvalue
            FROM allele
            WHERE genesymbol = ? AND clinicalfunctionalstatus IS NOT NULL
            ORDER BY name
            "#,
        )
        .bind(gene)
        .fetch_all(self.pool)
        .await?;

        Ok(functions)
    }

    async fn diplotypes(&self, gene: &str) -> DbResult<Vec<Diplotype>> {
        // Lookup and diplotype keys are JSON objects keyed by gene symbol.
        let diplotypes = sqlx::query_as::<_, Diplotype>(
            r#"
            SELECT diplotype, generesult, description,
                   lookupkey ->> ('$."' || genesymbol || '"') AS lookupkey,
                   diplotypekey -> ('$."' || genesymbol || '"') AS diplotypekey
            FROM diplotype
            WHERE genesymbol = ?
            ORDER BY diplotype
            "#,
        )
        .bind(gene)
        .fetch_all(self.pool)
        .await?;

        Ok(diplotypes)
    }
}
