//! Guideline drug export (`drugs.json`).

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::instrument;

use crate::db::{Database, DbResult, GuidelineDrug, GuidelineRepository, Publication, Recommendation};
use crate::util::find_unique;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugGuideline {
    pub drugid: String,
    pub drugname: String,
    pub guidelinename: String,
    pub url: Option<String>,
    pub guidelinepharmgkbids: Vec<String>,
    pub genes: Vec<String>,
    pub citations: Vec<Publication>,
    pub notesonusage: Option<String>,
    pub recommendations: Vec<Recommendation>,
}

/// Combine one drug row with its guideline's citations and the drug's recommendations.
///
/// Genes are the sorted union of recommendation lookup-key genes and the
/// guideline's own gene list. Citations are deduplicated by publication id.
pub fn assemble_drug(
    drug: GuidelineDrug,
    citations: Vec<Publication>,
    recommendations: Vec<Recommendation>,
) -> DrugGuideline {
    let genes: BTreeSet<String> = recommendations
        .iter()
        .flat_map(Recommendation::lookup_genes)
        .chain(drug.genes.0)
        .collect();

    DrugGuideline {
        drugid: drug.drugid,
        drugname: drug.drugname,
        guidelinename: drug.guidelinename,
        url: drug.url,
        guidelinepharmgkbids: drug.pharmgkbids.0,
        genes: genes.into_iter().collect(),
        citations: find_unique(citations, |p| p.id),
        notesonusage: drug.notesonusage,
        recommendations,
    }
}

#[instrument(skip(db))]
pub async fn export_guidelines<D: Database>(db: &D) -> DbResult<Vec<DrugGuideline>> {
    let repo = db.guidelines();
    let mut drugs = Vec::new();

    for drug in repo.recommendation_drugs().await? {
        let citations = repo.citations(drug.guidelineid).await?;
        let recommendations = repo.recommendations(&drug.drugid).await?;
        drugs.push(assemble_drug(drug, citations, recommendations));
    }

    Ok(drugs)
}
