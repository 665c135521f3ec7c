//! Pair summary export (`cpicPairs.json`, `cpicPairs.csv`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::clock::Clock;
use crate::export::{OutputFile, write_outputs};
use crate::rest::client::CpicApiClient;
use crate::rest::csv_text;
use crate::rest::error::RestResult;

pub const PAIRS_FILE_STEM: &str = "cpicPairs";

pub const PAIR_CSV_HEADERS: [&str; 8] = [
    "Gene",
    "Drug",
    "Guideline",
    "CPIC Level",
    "CPIC Level Status",
    "PharmGKB Level of Evidence",
    "PGx on FDA Label",
    "CPIC Publications (PMID)",
];

/// One `pair_view` row. Columns not used here pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairViewRow {
    pub genesymbol: String,
    pub drugname: String,
    #[serde(default)]
    pub guidelineurl: Option<String>,
    #[serde(default)]
    pub cpiclevel: Option<String>,
    #[serde(default)]
    pub provisional: Option<bool>,
    #[serde(default)]
    pub pgkbcalevel: Option<String>,
    #[serde(default)]
    pub pgxtesting: Option<String>,
    #[serde(default)]
    pub pmids: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A pair row with the short aliases used by the website.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairEntry {
    #[serde(flatten)]
    pub row: PairViewRow,
    pub gene: String,
    pub level: Option<String>,
    pub citations: Option<Vec<String>>,
}

impl From<PairViewRow> for PairEntry {
    fn from(row: PairViewRow) -> Self {
        Self {
            gene: row.genesymbol.clone(),
            level: row.cpiclevel.clone(),
            citations: row.pmids.clone(),
            row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSummary {
    pub count_drugs: usize,
    pub count_genes: usize,
    /// Number of pair rows listed.
    pub count_guidelines: usize,
    pub last_updated: String,
    pub pairs: Vec<PairEntry>,
}

/// `MMM D, YYYY`, e.g. `Mar 9, 2024`.
pub fn last_updated_label<C: Clock + ?Sized>(clock: &C) -> String {
    clock.now().format("%b %-d, %Y").to_string()
}

pub fn summarize(rows: Vec<PairViewRow>, last_updated: String) -> PairSummary {
    let drugs: HashSet<&str> = rows.iter().map(|r| r.drugname.as_str()).collect();
    let genes: HashSet<&str> = rows.iter().map(|r| r.genesymbol.as_str()).collect();

    PairSummary {
        count_drugs: drugs.len(),
        count_genes: genes.len(),
        count_guidelines: rows.len(),
        last_updated,
        pairs: rows.into_iter().map(PairEntry::from).collect(),
    }
}

/// CSV body preceded by the quoted `Date last updated` line.
pub fn render_csv(summary: &PairSummary) -> RestResult<String> {
    let records = summary.pairs.iter().map(|entry| {
        let row = &entry.row;
        vec![
            row.genesymbol.clone(),
            row.drugname.clone(),
            row.guidelineurl.clone().unwrap_or_default(),
            row.cpiclevel.clone().unwrap_or_default(),
            if row.provisional.unwrap_or(false) {
                "Provisional".to_string()
            } else {
                "Final".to_string()
            },
            row.pgkbcalevel.clone().unwrap_or_default(),
            row.pgxtesting.clone().unwrap_or_default(),
            row.pmids.as_deref().unwrap_or_default().join(";"),
        ]
    });

    let body = csv_text(&PAIR_CSV_HEADERS, records, csv::Terminator::CRLF)?;
    Ok(format!(
        "\"Date last updated: {}\"\n{}",
        summary.last_updated, body
    ))
}

#[instrument(skip(client, clock))]
pub async fn write_pairs<C: Clock + ?Sized>(
    client: &CpicApiClient,
    clock: &C,
    dir: &Path,
) -> RestResult<Vec<PathBuf>> {
    let rows: Vec<PairViewRow> = client
        .fetch("/pair_view", &[("order", "cpiclevel,drugname")])
        .await?;
    info!("{} pairs from the data API", rows.len());

    let summary = summarize(rows, last_updated_label(clock));
    let files = vec![
        OutputFile::json(dir.join(format!("{}.json", PAIRS_FILE_STEM)), &summary)?,
        OutputFile::new(
            dir.join(format!("{}.csv", PAIRS_FILE_STEM)),
            render_csv(&summary)?,
        ),
    ];

    Ok(write_outputs(&files).await?)
}
