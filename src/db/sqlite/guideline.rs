//! SQLite GuidelineRepository implementation.

use sqlx::SqlitePool;

use crate::db::{DbResult, GuidelineDrug, GuidelineRepository, Publication, Recommendation};

/// SQLx-backed guideline and recommendation queries.
pub struct SqliteGuidelineRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> GuidelineRepository for SqliteGuidelineRepository<'a> {
    async fn recommendation_drugs(&self) -> DbResult<Vec<GuidelineDrug>> {
        // One row per (drug, guideline); a drug reached through several genes
        // of the same guideline collapses here.
        let drugs = sqlx::query_as::<_, GuidelineDrug>(
            r#"
            SELECT DISTINCT d.drugid, d.name AS drugname, g.id AS guidelineid,
                   g.name AS guidelinename, g.url, g.pharmgkbid AS pharmgkbids,
                   g.genes, g.notesonusage
            FROM guideline g
            JOIN pair p ON g.id = p.guidelineid
            JOIN drug d ON p.drugid = d.drugid
            WHERE p.usedforrecommendation = 1 AND p.removed = 0
            ORDER BY d.name, g.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(drugs)
    }

    async fn citations(&self, guideline_id: i64) -> DbResult<Vec<Publication>> {
        let publications = sqlx::query_as::<_, Publication>(
            r#"
            SELECT id, guidelineid, title, authors, journal, month, page, volume,
                   year, pmid, pmcid, doi, url
            FROM publication
            WHERE guidelineid = ?
            ORDER BY year, id
            "#,
        )
        .bind(guideline_id)
        .fetch_all(self.pool)
        .await?;

        Ok(publications)
    }

    async fn recommendations(&self, drug_id: &str) -> DbResult<Vec<Recommendation>> {
        let recommendations = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT implications, drugrecommendation, classification, phenotypes,
                   activityscore, allelestatus, lookupkey, comments, population
            FROM recommendation
            WHERE drugid = ?
            ORDER BY lookupkey, population, id
            "#,
        )
        .bind(drug_id)
        .fetch_all(self.pool)
        .await?;

        Ok(recommendations)
    }
}
