//! SQLite AlleleRepository implementation.

use sqlx::SqlitePool;

use crate::db::{
    AlleleDefinition, AlleleLocationValue, AlleleRepository, DbError, DbResult, DefinitionGene,
    SequenceLocation,
};

/// SQLx-backed allele definition queries.
pub struct SqliteAlleleRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

/// Encode a denylist for `NOT IN (SELECT value FROM json_each(?))`.
pub(crate) fn denylist_json(denylist: &[&str]) -> DbResult<String> {
    serde_json::to_string(denylist).map_err(|e| DbError::InvalidData {
        message: format!("Failed to encode gene denylist: {}", e),
    })
}

impl<'a> AlleleRepository for SqliteAlleleRepository<'a> {
    async fn definition_genes(&self, denylist: &[&str]) -> DbResult<Vec<DefinitionGene>> {
        let genes = sqlx::query_as::<_, DefinitionGene>(
            r#"
            SELECT DISTINCT g.symbol, g.chr, g.genesequenceid, g.chromosequenceid, g.proteinsequenceid
            FROM allele_definition a
            JOIN gene g ON a.genesymbol = g.symbol
            WHERE a.reference = 1
              AND g.symbol NOT IN (SELECT value FROM json_each(?))
            ORDER BY g.symbol
            "#,
        )
        .bind(denylist_json(denylist)?)
        .fetch_all(self.pool)
        .await?;

        Ok(genes)
    }

    async fn variants(&self, gene: &str) -> DbResult<Vec<SequenceLocation>> {
        let variants = sqlx::query_as::<_, SequenceLocation>(
            r#"
            SELECT sl.id, g.chr, sl.position, sl.dbsnpid, sl.chromosomelocation,
                   sl.genelocation, sl.proteinlocation, sl.name
            FROM allele_definition a
            JOIN allele_location_value alv ON a.id = alv.alleledefinitionid
            JOIN sequence_location sl ON alv.locationid = sl.id
            JOIN gene g ON a.genesymbol = g.symbol
            WHERE a.genesymbol = ? AND a.reference = 1
            ORDER BY sl.position, sl.id
            "#,
        )
        .bind(gene)
        .fetch_all(self.pool)
        .await?;

        Ok(variants)
    }

    async fn variant_alleles(&self, location_id: i64) -> DbResult<Vec<String>> {
        let alleles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT v.variantallele
            FROM allele_location_value v
            JOIN allele_definition ad ON v.alleledefinitionid = ad.id
            WHERE v.locationid = ? AND ad.structuralvariation = 0
            ORDER BY v.variantallele
            "#,
        )
        .bind(location_id)
        .fetch_all(self.pool)
        .await?;

        Ok(alleles)
    }

    async fn named_alleles(&self, gene: &str) -> DbResult<Vec<AlleleDefinition>> {
        let alleles = sqlx::query_as::<_, AlleleDefinition>(
            r#"
            SELECT id, name, reference
            FROM allele_definition
            WHERE genesymbol = ? AND structuralvariation = 0
            ORDER BY reference DESC, name
            "#,
        )
        .bind(gene)
        .fetch_all(self.pool)
        .await?;

        Ok(alleles)
    }

    async fn location_values(&self, gene: &str) -> DbResult<Vec<AlleleLocationValue>> {
        let values = sqlx::query_as::<_, AlleleLocationValue>(
            r#"
            SELECT v.alleledefinitionid, v.locationid, v.variantallele
            FROM allele_location_value v
            JOIN allele_definition a ON v.alleledefinitionid = a.id
            WHERE a.genesymbol = ?
            "#,
        )
        .bind(gene)
        .fetch_all(self.pool)
        .await?;

        Ok(values)
    }

    async fn definition_notes(&self, gene: &str) -> DbResult<Vec<String>> {
        let notes: Vec<String> = sqlx::query_scalar(
            "SELECT note FROM file_note WHERE entityid = ? AND type = 'ALLELE_DEFINITION' ORDER BY ordinal, id",
        )
        .bind(gene)
        .fetch_all(self.pool)
        .await?;

        Ok(notes)
    }
}
