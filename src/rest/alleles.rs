//! Allele/guideline listing export (JSON and CSV).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::export::{OutputFile, write_outputs};
use crate::rest::client::CpicApiClient;
use crate::rest::csv_text;
use crate::rest::error::RestResult;
use crate::util::{find_unique, group_by};

pub const ALLELE_CSV_HEADERS: [&str; 4] = ["Gene", "Allele", "Guideline", "URL"];

/// One `allele_guideline_view` row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlleleGuidelineRow {
    pub genesymbol: String,
    pub allele_name: String,
    pub guideline_name: String,
    pub guideline_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneRef {
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlleleRef {
    pub name: String,
    pub gene: GeneRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidelineLink {
    pub url: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlleleGuidelines {
    pub allele: AlleleRef,
    pub guidelines: Vec<GuidelineLink>,
}

/// One record per distinct (gene, allele), in first-seen order, listing every
/// guideline that row set mentions.
pub fn collect_alleles(rows: &[AlleleGuidelineRow]) -> Vec<AlleleGuidelines> {
    let mut guidelines = group_by(rows.iter(), |r| (r.genesymbol.as_str(), r.allele_name.as_str()));

    find_unique(rows.iter(), |r| (r.genesymbol.as_str(), r.allele_name.as_str()))
        .into_iter()
        .map(|row| {
            let links = guidelines
                .remove(&(row.genesymbol.as_str(), row.allele_name.as_str()))
                .unwrap_or_default()
                .into_iter()
                .map(|r| GuidelineLink {
                    url: r.guideline_url.clone(),
                    title: r.guideline_name.clone(),
                })
                .collect();
            AlleleGuidelines {
                allele: AlleleRef {
                    name: row.allele_name.clone(),
                    gene: GeneRef {
                        symbol: row.genesymbol.clone(),
                    },
                },
                guidelines: links,
            }
        })
        .collect()
}

/// One CSV line per view row.
pub fn render_csv(rows: &[AlleleGuidelineRow]) -> RestResult<String> {
    let records = rows.iter().map(|r| {
        vec![
            r.genesymbol.clone(),
            r.allele_name.clone(),
            r.guideline_name.clone(),
            r.guideline_url.clone().unwrap_or_default(),
        ]
    });
    csv_text(&ALLELE_CSV_HEADERS, records, csv::Terminator::Any(b'\n'))
}

#[instrument(skip(client))]
pub async fn write_alleles(
    client: &CpicApiClient,
    json_path: &Path,
    csv_path: &Path,
) -> RestResult<Vec<PathBuf>> {
    let rows: Vec<AlleleGuidelineRow> = client.fetch("/allele_guideline_view", &[]).await?;
    info!("{} allele guideline rows from the data API", rows.len());

    let files = vec![
        OutputFile::json(json_path, &collect_alleles(&rows))?,
        OutputFile::new(csv_path, render_csv(&rows)?),
    ];

    Ok(write_outputs(&files).await?)
}
