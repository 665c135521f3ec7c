use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;
use crate::export::ExportError;
use crate::rest::RestError;
use crate::sync::SyncError;
use crate::xref::XrefError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to create directory {path}")]
    #[diagnostic(code(cpic::cli::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rest(#[from] RestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Xref(#[from] XrefError),
}

pub type CliResult<T> = Result<T, CliError>;
