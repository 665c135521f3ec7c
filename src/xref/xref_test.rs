use serde_json::json;

use crate::rest::CpicApiClient;
use crate::xref::hgnc::*;
use crate::xref::literature::*;
use crate::xref::ncbi::*;
use crate::xref::*;

fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[test]
fn sql_literal_escapes_quotes_and_renders_null() {
    assert_eq!(sql_literal(Some("CYP2D6")), "'CYP2D6'");
    assert_eq!(sql_literal(Some("O'Brien")), "'O''Brien'");
    assert_eq!(sql_literal(None), "null");
}

#[test]
fn hgnc_ids_come_from_the_first_document() {
    let body = json!({
        "response": {
            "numFound": 1,
            "docs": [{
                "hgnc_id": "HGNC:2625",
                "entrez_id": "1565",
                "ensembl_gene_id": "ENSG00000100197"
            }]
        }
    });

    let ids = HgncIds::from_response(&body);

    assert_eq!(
        gene_update_sql("CYP2D6", &ids),
        "update gene set hgncid='HGNC:2625',ncbiid='1565',ensemblid='ENSG00000100197' where symbol='CYP2D6';"
    );
}

#[test]
fn hgnc_without_documents_renders_nulls() {
    let ids = HgncIds::from_response(&json!({"response": {"numFound": 0, "docs": []}}));
    assert_eq!(
        gene_update_sql("NEW1", &ids),
        "update gene set hgncid=null,ncbiid=null,ensemblid=null where symbol='NEW1';"
    );
}

#[test]
fn idconv_record_yields_pmcid_and_doi() {
    let body = json!({
        "status": "ok",
        "records": [{"pmid": "33387367", "pmcid": "PMC8249478", "doi": "10.1002/cpt.2149"}]
    });

    let ids = ConvertedIds::from_response(&body);

    assert_eq!(
        publication_update_sql("33387367", &ids),
        "update publication set pmcid='PMC8249478',doi='10.1002/cpt.2149' where pmid='33387367';"
    );
}

#[test]
fn idconv_record_without_pmcid_keeps_doi() {
    let ids = ConvertedIds::from_response(&json!({"records": [{"doi": "10.1/x"}]}));
    assert_eq!(ids.pmcid, None);
    assert_eq!(ids.doi.as_deref(), Some("10.1/x"));
}

#[test]
fn literature_copy_block_has_eight_columns() {
    let body = json!({
        "data": [{
            "title": "CPIC guideline for codeine",
            "authors": ["Crews KR", "Gaedigk A"],
            "journal": "Clin Pharmacol Ther",
            "month": 4,
            "year": 2014
        }]
    });

    let literature = Literature::from_response(&body).unwrap();
    let block = copy_block("24458010", &literature);
    let lines: Vec<&str> = block.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COPY_HEADER);
    assert_eq!(
        lines[1],
        "CPIC guideline for codeine\t{\"Crews KR\",\"Gaedigk A\"}\tClin Pharmacol Ther\t4\t\t\t2014\t24458010"
    );
    assert_eq!(lines[2], "\\.");
}

#[test]
fn literature_missing_values_use_the_copy_null_marker() {
    let literature = Literature::from_response(&json!({"data": [{"title": "Tab\there"}]})).unwrap();

    let block = copy_block("1", &literature);
    let row = block.lines().nth(1).unwrap();

    assert_eq!(row, "Tab\\there\t{}\t\\N\t\\N\t\t\t\\N\t1");
}

#[test]
fn literature_search_without_records_is_none() {
    assert!(Literature::from_response(&json!({"data": []})).is_none());
}

#[tokio::test]
async fn update_genes_connection_error() {
    init_crypto();
    let api = CpicApiClient::new("http://localhost:9999");
    let xref = XrefClient::new();

    let result = update_genes(&api, &xref, "http://localhost:9999/fetch/symbol/").await;

    assert!(matches!(result, Err(XrefError::Rest(_))));
}

#[tokio::test]
async fn lookup_publication_connection_error() {
    init_crypto();
    let xref = XrefClient::new();

    let result = lookup_publication(&xref, "http://localhost:9999/literature/", "24458010").await;

    assert!(
        matches!(result, Err(XrefError::ConnectionFailed { .. })),
        "Expected ConnectionFailed, got: {:?}",
        result
    );
}
