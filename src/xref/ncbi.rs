//! Publication identifiers from the NCBI ID converter.

use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::rest::CpicApiClient;
use crate::util::deep_get_string;
use crate::xref::{XrefClient, XrefError, XrefResult, sql_literal};

pub const IDCONV_EMAIL: &str = "ops@cpicpgx.org";
pub const IDCONV_TOOL: &str = "cpicpgx";

#[derive(Debug, Deserialize)]
struct PublicationPmid {
    pmid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedIds {
    pub pmcid: Option<String>,
    pub doi: Option<String>,
}

impl ConvertedIds {
    pub fn from_response(body: &Value) -> Self {
        Self {
            pmcid: deep_get_string(body, "records[0].pmcid"),
            doi: deep_get_string(body, "records[0].doi"),
        }
    }
}

pub fn publication_update_sql(pmid: &str, ids: &ConvertedIds) -> String {
    format!(
        "update publication set pmcid={},doi={} where pmid={};",
        sql_literal(ids.pmcid.as_deref()),
        sql_literal(ids.doi.as_deref()),
        sql_literal(Some(pmid))
    )
}

/// One `update publication` statement per publication without a PMC id.
///
/// A PMID whose lookup fails is logged and left out.
#[instrument(skip(api, xref))]
pub async fn update_publications(
    api: &CpicApiClient,
    xref: &XrefClient,
    idconv_url: &str,
) -> XrefResult<Vec<String>> {
    let rows: Vec<PublicationPmid> = api
        .fetch("/publication", &[("pmcid", "is.null"), ("select", "pmid")])
        .await?;
    let pmids: Vec<String> = rows.into_iter().filter_map(|r| r.pmid).collect();
    info!("{} publications without a PMC id", pmids.len());

    let lookups = pmids.iter().map(|pmid| async move {
        let body = xref
            .fetch_json(
                idconv_url,
                &[
                    ("format", "json"),
                    ("email", IDCONV_EMAIL),
                    ("tool", IDCONV_TOOL),
                    ("ids", pmid.as_str()),
                ],
            )
            .await?;
        Ok::<_, XrefError>(publication_update_sql(pmid, &ConvertedIds::from_response(&body)))
    });

    let mut statements = Vec::new();
    for (pmid, result) in pmids.iter().zip(join_all(lookups).await) {
        match result {
            Ok(sql) => statements.push(sql),
            Err(e) => warn!("ID conversion failed for {}: {}", pmid, e),
        }
    }
    Ok(statements)
}
