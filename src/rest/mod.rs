//! Exporters backed by the public CPIC data API.
//!
//! # Architecture
//!
//! - `client`: PostgREST request helper with shared error mapping
//! - `pairs`: `cpicPairs.json` and `cpicPairs.csv`
//! - `alleles`: allele to guideline listing
//! - `guidelines`: guideline and publication dumps

pub mod alleles;
pub mod client;
pub mod error;
pub mod guidelines;
pub mod pairs;

#[cfg(test)]
mod alleles_test;

use std::path::{Path, PathBuf};

use tracing::{error, instrument};

pub use client::CpicApiClient;
pub use error::{RestError, RestResult};

use crate::clock::Clock;

pub const SITE_ALLELES_JSON: &str = "alleles.json";
pub const SITE_ALLELES_CSV: &str = "alleles.csv";

/// Render header and records as CSV, quoting only where needed.
///
/// The final line has no terminator.
pub(crate) fn csv_text(
    headers: &[&str],
    records: impl IntoIterator<Item = Vec<String>>,
    terminator: csv::Terminator,
) -> RestResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(terminator)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| RestError::Csv {
        message: e.to_string(),
    })?;
    let text = String::from_utf8(bytes).map_err(|e| RestError::Csv {
        message: e.to_string(),
    })?;

    let trimmed = match terminator {
        csv::Terminator::CRLF => text.strip_suffix("\r\n"),
        csv::Terminator::Any(b) => text.strip_suffix(char::from(b)),
        _ => None,
    };
    Ok(trimmed.map(str::to_string).unwrap_or(text))
}

/// Refresh the website data files: alleles, guidelines and pairs.
///
/// The three exports run concurrently and independently; every failure is
/// logged and the first one is returned.
#[instrument(skip(client, clock))]
pub async fn write_site_data<C: Clock + ?Sized>(
    client: &CpicApiClient,
    clock: &C,
    dir: &Path,
) -> RestResult<Vec<PathBuf>> {
    let alleles_json = dir.join(SITE_ALLELES_JSON);
    let alleles_csv = dir.join(SITE_ALLELES_CSV);

    let (alleles, guidelines, pairs) = tokio::join!(
        alleles::write_alleles(client, &alleles_json, &alleles_csv),
        guidelines::write_guidelines(client, dir),
        pairs::write_pairs(client, clock, dir),
    );

    let mut written = Vec::new();
    let mut first_error = None;
    for result in [alleles, guidelines, pairs] {
        match result {
            Ok(files) => written.extend(files),
            Err(e) => {
                error!("site data export failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(written),
    }
}
