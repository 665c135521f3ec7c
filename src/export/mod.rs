//! Database-backed exporters.
//!
//! # Architecture
//!
//! - `allele_definition`: per-gene allele definitions and the haplotype id list
//! - `gene_phenotype`: allele function and diplotype lookups per gene
//! - `guideline`: drugs with guideline metadata and recommendations
//! - `change_log`: tab-separated audit report
//! - `writer`: independent, awaited file writes
//!
//! Builders return typed records; only the functions in this module touch
//! the filesystem.

pub mod allele_definition;
pub mod change_log;
pub mod gene_phenotype;
pub mod guideline;
pub mod writer;

#[cfg(test)]
mod allele_definition_test;

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::GENE_DENYLIST;
use crate::clock::Clock;
use crate::db::{ChangeLogRepository, Database, DbError};

pub use allele_definition::{AlleleDefinitionExport, export_allele_definitions};
pub use change_log::render_change_log;
pub use gene_phenotype::export_gene_phenotypes;
pub use guideline::export_guidelines;
pub use writer::{OutputFile, write_outputs};

pub const ALLELE_DEFINITIONS_FILE: &str = "allele_definitions.json";
pub const HAPLOTYPE_ID_FILE: &str = "haplotype_id_list.tsv";
pub const GENE_PHENOTYPES_FILE: &str = "gene_phenotypes.json";
pub const DRUGS_FILE: &str = "drugs.json";

#[derive(Error, Diagnostic, Debug)]
pub enum ExportError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(cpic::export::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {} output file(s): {}", failed.len(), failed.join(", "))]
    #[diagnostic(
        code(cpic::export::incomplete),
        help("Files that were written are complete; check permissions on the output directory.")
    )]
    Incomplete { failed: Vec<String> },
}

/// Counts reported after a definitions run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSummary {
    pub allele_genes: usize,
    pub skipped_genes: Vec<String>,
    pub named_alleles: usize,
    pub phenotype_genes: usize,
    pub drugs: usize,
    pub files: Vec<PathBuf>,
}

/// Build the four definition files and write them into `dir`.
///
/// Allele definitions (with the haplotype id list), gene phenotypes and drug
/// recommendations are built and written independently: a query failure in
/// one leaves the others' files in place. Every failure is logged; the first
/// query error is returned, otherwise the files that could not be written.
#[instrument(skip(db, clock))]
pub async fn write_definition_files<D: Database, C: Clock + ?Sized>(
    db: &D,
    clock: &C,
    cpic_version: &str,
    dir: &Path,
) -> Result<DefinitionSummary, ExportError> {
    let (alleles, phenotypes, drugs) = tokio::join!(
        async {
            let export = export_allele_definitions(db, clock, cpic_version, GENE_DENYLIST).await?;
            info!("done with allele definitions");
            let written = write_outputs(&[
                OutputFile::json(dir.join(ALLELE_DEFINITIONS_FILE), &export.definitions)?,
                OutputFile::new(dir.join(HAPLOTYPE_ID_FILE), export.haplotype_id_list()),
            ])
            .await?;
            Ok::<_, ExportError>((export, written))
        },
        async {
            let phenotypes = export_gene_phenotypes(db, cpic_version, GENE_DENYLIST).await?;
            info!("done with gene phenotypes");
            let written =
                write_outputs(&[OutputFile::json(dir.join(GENE_PHENOTYPES_FILE), &phenotypes)?])
                    .await?;
            Ok::<_, ExportError>((phenotypes.len(), written))
        },
        async {
            let drugs = export_guidelines(db).await?;
            info!("done with recommendations");
            let written = write_outputs(&[OutputFile::json(dir.join(DRUGS_FILE), &drugs)?]).await?;
            Ok::<_, ExportError>((drugs.len(), written))
        },
    );

    let mut summary = DefinitionSummary::default();
    let mut errors = Vec::new();

    match alleles {
        Ok((export, written)) => {
            summary.allele_genes = export.definitions.len();
            summary.named_alleles = export
                .definitions
                .iter()
                .map(|d| d.named_alleles.len())
                .sum();
            summary.skipped_genes = export.skipped;
            summary.files.extend(written);
        }
        Err(e) => {
            error!("allele definition export failed: {}", e);
            errors.push(e);
        }
    }
    match phenotypes {
        Ok((count, written)) => {
            summary.phenotype_genes = count;
            summary.files.extend(written);
        }
        Err(e) => {
            error!("gene phenotype export failed: {}", e);
            errors.push(e);
        }
    }
    match drugs {
        Ok((count, written)) => {
            summary.drugs = count;
            summary.files.extend(written);
        }
        Err(e) => {
            error!("recommendation export failed: {}", e);
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(summary)
    } else {
        Err(first_failure(errors))
    }
}

// First non-write error wins; write failures are merged into one list.
fn first_failure(errors: Vec<ExportError>) -> ExportError {
    let mut failed = Vec::new();
    for e in errors {
        match e {
            ExportError::Incomplete { failed: files } => failed.extend(files),
            other => return other,
        }
    }
    ExportError::Incomplete { failed }
}

/// Dump the change log to `path`, returning the number of entries.
#[instrument(skip(db))]
pub async fn write_change_log<D: Database>(db: &D, path: &Path) -> Result<usize, ExportError> {
    let entries = db.change_log().list().await?;
    let count = entries.len();
    write_outputs(&[OutputFile::new(path, render_change_log(entries))]).await?;
    Ok(count)
}
