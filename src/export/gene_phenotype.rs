//! Gene phenotype export (`gene_phenotypes.json`).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::db::{AlleleFunction, Database, DbResult, Diplotype, PhenotypeRepository};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenePhenotype {
    pub gene: String,
    pub cpic_version: String,
    /// Allele name to clinical functional status.
    pub haplotypes: BTreeMap<String, String>,
    /// Allele name to activity value, for alleles that have one.
    pub activity_values: BTreeMap<String, String>,
    pub diplotypes: Vec<Diplotype>,
}

/// Split allele function rows into the status and activity maps.
pub fn function_maps(
    functions: Vec<AlleleFunction>,
) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut haplotypes = BTreeMap::new();
    let mut activity_values = BTreeMap::new();

    for function in functions {
        if let Some(value) = function.activityvalue {
            activity_values.insert(function.name.clone(), value);
        }
        haplotypes.insert(function.name, function.clinicalfunctionalstatus);
    }

    (haplotypes, activity_values)
}

/// Genes without a single allele of known function are left out entirely.
#[instrument(skip(db))]
pub async fn export_gene_phenotypes<D: Database>(
    db: &D,
    cpic_version: &str,
    denylist: &[&str],
) -> DbResult<Vec<GenePhenotype>> {
    let repo = db.phenotypes();
    let mut phenotypes = Vec::new();

    for gene in repo.genes_with_alleles(denylist).await? {
        let functions = repo.allele_functions(&gene).await?;
        if functions.is_empty() {
            debug!("No allele functions for {}", gene);
            continue;
        }

        let (haplotypes, activity_values) = function_maps(functions);
        phenotypes.push(GenePhenotype {
            diplotypes: repo.diplotypes(&gene).await?,
            gene,
            cpic_version: cpic_version.to_string(),
            haplotypes,
            activity_values,
        });
    }

    Ok(phenotypes)
}
