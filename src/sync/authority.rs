//! The external authority that proposes pair annotation changes.

use miette::Diagnostic;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::db::{PairField, PairSnapshot};

pub const PAIR_ENDPOINT: &str = "/v1/collaborator/cpic/pair";

#[derive(Error, Diagnostic, Debug)]
pub enum AuthorityError {
    #[error("Failed to connect to PharmGKB")]
    #[diagnostic(
        code(cpic::authority::connection_failed),
        help("Set PGKBAPI to the PharmGKB domain (and port) to use.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from PharmGKB: {message}")]
    #[diagnostic(code(cpic::authority::invalid_response))]
    InvalidResponse { message: String },

    #[error("PharmGKB error ({status}): {message}")]
    #[diagnostic(code(cpic::authority::api_error))]
    ApiError { status: u16, message: String },
}

impl From<reqwest::Error> for AuthorityError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            AuthorityError::ConnectionFailed { source: e }
        } else {
            AuthorityError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

/// One proposed change. A field that is absent or null proposes nothing.
///
/// A blank or non-numeric `pairid` reads as no pair id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedChange {
    #[serde(default, deserialize_with = "lenient_pair_id")]
    pub pairid: Option<i64>,
    #[serde(default)]
    pub pgkbcalevel: Option<String>,
    #[serde(default)]
    pub pgxtesting: Option<String>,
}

fn lenient_pair_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl ProposedChange {
    pub fn proposal(&self, field: PairField) -> Option<&str> {
        match field {
            PairField::PgkbLevel => self.pgkbcalevel.as_deref(),
            PairField::PgxTesting => self.pgxtesting.as_deref(),
        }
    }
}

/// The authority answers either with a bare list or `{ "data": [...] }`.
///
/// Elements are decoded one at a time; an element that is not a change
/// object is logged and dropped without affecting the others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProposalResponse {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(default)]
        data: Vec<Value>,
    },
}

impl ProposalResponse {
    pub fn into_changes(self) -> Vec<ProposedChange> {
        let elements = match self {
            ProposalResponse::Bare(elements) => elements,
            ProposalResponse::Wrapped { data } => data,
        };
        elements
            .into_iter()
            .filter_map(|element| match serde_json::from_value(element) {
                Ok(change) => Some(change),
                Err(e) => {
                    warn!("Skipping malformed change: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Source of proposed pair changes.
pub trait PairAuthority: Send + Sync {
    async fn propose_changes(
        &self,
        pairs: &[PairSnapshot],
    ) -> Result<Vec<ProposedChange>, AuthorityError>;
}

/// PharmGKB collaborator API client.
pub struct PharmGkbClient {
    base_url: String,
    client: Client,
}

impl PharmGkbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PAIR_ENDPOINT)
    }
}

impl PairAuthority for PharmGkbClient {
    #[instrument(skip(self, pairs), fields(pairs = pairs.len()))]
    async fn propose_changes(
        &self,
        pairs: &[PairSnapshot],
    ) -> Result<Vec<ProposedChange>, AuthorityError> {
        let url = self.endpoint();
        debug!("POST {}", url);
        let response = self.client.post(&url).json(pairs).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthorityError::ApiError { status, message });
        }

        let body: ProposalResponse =
            response
                .json()
                .await
                .map_err(|e| AuthorityError::InvalidResponse {
                    message: e.to_string(),
                })?;
        Ok(body.into_changes())
    }
}
