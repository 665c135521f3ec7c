//! Guideline and publication dumps from the data API.
//!
//! Responses are written as returned, pretty-printed.

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::{info, instrument};

use crate::export::{OutputFile, write_outputs};
use crate::rest::client::CpicApiClient;
use crate::rest::error::{RestError, RestResult};

pub const GUIDELINES_FILE: &str = "guidelines.json";
pub const PUBLICATIONS_FILE: &str = "publications.json";

/// Publications the website links to directly by PMID.
pub const FEATURED_PMIDS: [&str; 6] = [
    "21270786", "24479687", "27441996", "27026620", "27864205", "31562822",
];

#[instrument(skip(client))]
pub async fn write_guidelines(client: &CpicApiClient, dir: &Path) -> RestResult<Vec<PathBuf>> {
    let guidelines: Value = client
        .fetch(
            "/guideline",
            &[("select", "name,url,gene(symbol),drug(name)"), ("order", "name")],
        )
        .await?;

    let file = OutputFile::json(dir.join(GUIDELINES_FILE), &guidelines)?;
    Ok(write_outputs(&[file]).await?)
}

#[instrument(skip(client))]
pub async fn write_publications(client: &CpicApiClient, dir: &Path) -> RestResult<Vec<PathBuf>> {
    let guidelines: Value = client
        .fetch(
            "/guideline",
            &[("select", "id,name,url,publication(*)"), ("order", "name")],
        )
        .await?;

    let featured = try_join_all(FEATURED_PMIDS.iter().map(|pmid| async move {
        let filter = format!("eq.{}", pmid);
        let publication: Value = client
            .fetch("/publication", &[("pmid", filter.as_str())])
            .await?;
        Ok::<_, RestError>(OutputFile::json(
            dir.join(format!("{}.json", pmid)),
            &publication,
        )?)
    }))
    .await?;
    info!("fetched {} featured publications", featured.len());

    let mut files = vec![OutputFile::json(dir.join(PUBLICATIONS_FILE), &guidelines)?];
    files.extend(featured);
    Ok(write_outputs(&files).await?)
}
