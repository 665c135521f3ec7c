use crate::cli::error::CliResult;
use crate::rest::CpicApiClient;
use crate::xref::{XrefClient, hgnc, literature, ncbi};

/// SQL output is returned as-is for the operator to pipe into psql.
pub async fn update_genes(
    api: &CpicApiClient,
    xref: &XrefClient,
    hgnc_url: &str,
) -> CliResult<String> {
    let statements = hgnc::update_genes(api, xref, hgnc_url).await?;
    Ok(statements.join("\n"))
}

pub async fn update_publications(
    api: &CpicApiClient,
    xref: &XrefClient,
    idconv_url: &str,
) -> CliResult<String> {
    let statements = ncbi::update_publications(api, xref, idconv_url).await?;
    Ok(statements.join("\n"))
}

pub async fn lookup_publication(
    xref: &XrefClient,
    literature_url: &str,
    pmid: &str,
) -> CliResult<String> {
    Ok(literature::lookup_publication(xref, literature_url, pmid).await?)
}
