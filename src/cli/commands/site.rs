use std::path::Path;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{ensure_dir, files_table};
use crate::clock::Clock;
use crate::rest::{self, CpicApiClient};

fn prepare(dir: &Path) -> CliResult<()> {
    ensure_dir(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

pub async fn pairs<C: Clock + ?Sized>(
    client: &CpicApiClient,
    clock: &C,
    dir: &Path,
) -> CliResult<String> {
    prepare(dir)?;
    let files = rest::pairs::write_pairs(client, clock, dir).await?;
    Ok(files_table(&files))
}

pub async fn alleles(client: &CpicApiClient, json_path: &Path, csv_path: &Path) -> CliResult<String> {
    let files = rest::alleles::write_alleles(client, json_path, csv_path).await?;
    Ok(files_table(&files))
}

pub async fn guidelines(client: &CpicApiClient, dir: &Path) -> CliResult<String> {
    prepare(dir)?;
    let files = rest::guidelines::write_guidelines(client, dir).await?;
    Ok(files_table(&files))
}

pub async fn publications(client: &CpicApiClient, dir: &Path) -> CliResult<String> {
    prepare(dir)?;
    let files = rest::guidelines::write_publications(client, dir).await?;
    Ok(files_table(&files))
}

pub async fn site_data<C: Clock + ?Sized>(
    client: &CpicApiClient,
    clock: &C,
    dir: &Path,
) -> CliResult<String> {
    prepare(dir)?;
    let files = rest::write_site_data(client, clock, dir).await?;
    Ok(files_table(&files))
}
