//! Cross-reference jobs.
//!
//! Each job looks up external identifiers and renders SQL for an operator to
//! review and apply; nothing here writes to the database.
//!
//! - `hgnc`: HGNC, NCBI Gene and Ensembl ids for genes missing them
//! - `ncbi`: PMC and DOI ids for publications missing them
//! - `literature`: a `COPY publication` block for one PubMed id

pub mod hgnc;
pub mod literature;
pub mod ncbi;

#[cfg(test)]
mod xref_test;

use miette::Diagnostic;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::rest::RestError;

#[derive(Error, Diagnostic, Debug)]
pub enum XrefError {
    #[error("Failed to reach {url}")]
    #[diagnostic(code(cpic::xref::connection_failed))]
    ConnectionFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {url}: {message}")]
    #[diagnostic(code(cpic::xref::invalid_response))]
    InvalidResponse { url: String, message: String },

    #[error("{url} returned {status}: {message}")]
    #[diagnostic(code(cpic::xref::api_error))]
    ApiError {
        url: String,
        status: u16,
        message: String,
    },

    #[error("No literature found for PMID {pmid}")]
    #[diagnostic(
        code(cpic::xref::not_found),
        help("Check that the PMID is indexed by PharmGKB.")
    )]
    NotFound { pmid: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rest(#[from] RestError),
}

pub type XrefResult<T> = Result<T, XrefError>;

/// JSON GET client for third-party lookup services.
pub struct XrefClient {
    client: Client,
}

impl XrefClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn fetch_json(&self, url: &str, query: &[(&str, &str)]) -> XrefResult<Value> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(XrefError::ApiError {
                url: url.to_string(),
                status,
                message,
            });
        }

        response.json().await.map_err(|e| classify(url, e))
    }
}

impl Default for XrefClient {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(url: &str, e: reqwest::Error) -> XrefError {
    if e.is_connect() || e.is_timeout() {
        XrefError::ConnectionFailed {
            url: url.to_string(),
            source: e,
        }
    } else {
        XrefError::InvalidResponse {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

/// Quote a value as a SQL string literal, or `null` when absent.
pub fn sql_literal(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("'{}'", v.replace('\'', "''")),
        None => "null".to_string(),
    }
}
