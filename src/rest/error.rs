use miette::Diagnostic;
use thiserror::Error;

use crate::export::ExportError;

#[derive(Error, Diagnostic, Debug)]
pub enum RestError {
    #[error("Failed to connect to the CPIC data API")]
    #[diagnostic(
        code(cpic::rest::connection_failed),
        help("Set API=dev for a local PostgREST server or CPIC_API_URL to point elsewhere.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the CPIC data API: {message}")]
    #[diagnostic(code(cpic::rest::invalid_response))]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(cpic::rest::api_error))]
    ApiError { status: u16, message: String },

    #[error("Failed to render CSV: {message}")]
    #[diagnostic(code(cpic::rest::csv))]
    Csv { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

impl From<reqwest::Error> for RestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            RestError::ConnectionFailed { source: e }
        } else {
            RestError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(e: serde_json::Error) -> Self {
        RestError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

impl From<csv::Error> for RestError {
    fn from(e: csv::Error) -> Self {
        RestError::Csv {
            message: e.to_string(),
        }
    }
}

pub type RestResult<T> = Result<T, RestError>;
