use std::path::Path;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{counts_table, ensure_dir, files_table};
use crate::clock::Clock;
use crate::db::Database;
use crate::export::{write_change_log, write_definition_files};

/// Write allele definitions, gene phenotypes and drugs into `output_path`.
pub async fn definitions<D: Database, C: Clock + ?Sized>(
    db: &D,
    clock: &C,
    cpic_version: &str,
    output_path: &Path,
) -> CliResult<String> {
    ensure_dir(output_path).map_err(|source| CliError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;

    let summary = write_definition_files(db, clock, cpic_version, output_path).await?;

    let mut output = counts_table(&[
        ("Genes with allele definitions", summary.allele_genes),
        ("Named alleles", summary.named_alleles),
        ("Genes skipped (no alleles)", summary.skipped_genes.len()),
        ("Genes with phenotypes", summary.phenotype_genes),
        ("Drugs", summary.drugs),
    ]);
    output.push('\n');
    output.push_str(&files_table(&summary.files));
    if !summary.skipped_genes.is_empty() {
        output.push_str(&format!("\nSkipped: {}", summary.skipped_genes.join(", ")));
    }
    Ok(output)
}

/// Dump the change log report to `path`.
pub async fn changelog<D: Database>(db: &D, path: &Path) -> CliResult<String> {
    let count = write_change_log(db, path).await?;
    Ok(format!(
        "Wrote {} change log entries to {}",
        count,
        path.display()
    ))
}
