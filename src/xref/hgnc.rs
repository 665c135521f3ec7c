//! Gene identifiers from HGNC.

use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::rest::CpicApiClient;
use crate::util::deep_get_string;
use crate::xref::{XrefClient, XrefError, XrefResult, sql_literal};

#[derive(Debug, Deserialize)]
struct GeneSymbol {
    symbol: String,
}

/// The identifiers taken from the first HGNC search document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HgncIds {
    pub hgnc_id: Option<String>,
    pub ncbi_id: Option<String>,
    pub ensembl_id: Option<String>,
}

impl HgncIds {
    pub fn from_response(body: &Value) -> Self {
        Self {
            hgnc_id: deep_get_string(body, "response.docs[0].hgnc_id"),
            ncbi_id: deep_get_string(body, "response.docs[0].entrez_id"),
            ensembl_id: deep_get_string(body, "response.docs[0].ensembl_gene_id"),
        }
    }
}

pub fn gene_update_sql(symbol: &str, ids: &HgncIds) -> String {
    format!(
        "update gene set hgncid={},ncbiid={},ensemblid={} where symbol={};",
        sql_literal(ids.hgnc_id.as_deref()),
        sql_literal(ids.ncbi_id.as_deref()),
        sql_literal(ids.ensembl_id.as_deref()),
        sql_literal(Some(symbol))
    )
}

/// One `update gene` statement per gene that has no HGNC id.
///
/// A gene whose lookup fails is logged and left out.
#[instrument(skip(api, xref))]
pub async fn update_genes(
    api: &CpicApiClient,
    xref: &XrefClient,
    hgnc_url: &str,
) -> XrefResult<Vec<String>> {
    let genes: Vec<GeneSymbol> = api
        .fetch("/gene", &[("hgncid", "is.null"), ("select", "symbol")])
        .await?;
    info!("{} genes without an HGNC id", genes.len());

    let lookups = genes.iter().map(|gene| async move {
        let url = format!("{}{}", hgnc_url, gene.symbol);
        let body = xref.fetch_json(&url, &[]).await?;
        Ok::<_, XrefError>(gene_update_sql(&gene.symbol, &HgncIds::from_response(&body)))
    });

    let mut statements = Vec::new();
    for (gene, result) in genes.iter().zip(join_all(lookups).await) {
        match result {
            Ok(sql) => statements.push(sql),
            Err(e) => warn!("HGNC lookup failed for {}: {}", gene.symbol, e),
        }
    }
    Ok(statements)
}
