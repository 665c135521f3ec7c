//! Runtime configuration.
//!
//! Values resolve with precedence: explicit override (CLI flag) > environment
//! variable > built-in default.

use std::env;
use std::path::PathBuf;

pub const DEV_API_URL: &str = "http://localhost:3000";
pub const PROD_API_URL: &str = "https://api.cpicpgx.org/v1";
pub const DEFAULT_PGKB_DOMAIN: &str = "localhost.pharmgkb.org:8543";
pub const DEFAULT_HGNC_URL: &str = "http://rest.genenames.org/fetch/symbol/";
pub const DEFAULT_NCBI_IDCONV_URL: &str = "https://www.ncbi.nlm.nih.gov/pmc/utils/idconv/v1.0/";
pub const DEFAULT_PGKB_LITERATURE_URL: &str = "https://api.pharmgkb.org/v1/preview/data/literature/";
pub const DEFAULT_CPIC_VERSION: &str = "dev";

/// Resolved settings shared by every job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Base URL of the PostgREST data API.
    pub api_url: String,
    /// Base URL of the PharmGKB collaborator API.
    pub pgkb_url: String,
    /// CPIC data release stamped into exported files.
    pub cpic_version: String,
    pub hgnc_url: String,
    pub ncbi_idconv_url: String,
    pub pgkb_literature_url: String,
}

impl Config {
    /// Build a configuration from environment variables.
    pub fn from_env() -> Self {
        let api_url = env::var("CPIC_API_URL").ok().unwrap_or_else(|| {
            match env::var("API").as_deref() {
                Ok("dev") => DEV_API_URL.to_string(),
                _ => PROD_API_URL.to_string(),
            }
        });

        let pgkb_domain =
            env::var("PGKBAPI").unwrap_or_else(|_| DEFAULT_PGKB_DOMAIN.to_string());

        Self {
            db_path: env::var("CPIC_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_db_path()),
            api_url,
            pgkb_url: format!("https://{}", pgkb_domain),
            cpic_version: env::var("CPIC_VERSION")
                .unwrap_or_else(|_| DEFAULT_CPIC_VERSION.to_string()),
            hgnc_url: env::var("HGNC_URL").unwrap_or_else(|_| DEFAULT_HGNC_URL.to_string()),
            ncbi_idconv_url: env::var("NCBI_IDCONV_URL")
                .unwrap_or_else(|_| DEFAULT_NCBI_IDCONV_URL.to_string()),
            pgkb_literature_url: env::var("PGKB_LITERATURE_URL")
                .unwrap_or_else(|_| DEFAULT_PGKB_LITERATURE_URL.to_string()),
        }
    }

    pub fn with_db_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = db_path;
        self
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_cpic_version(mut self, cpic_version: String) -> Self {
        self.cpic_version = cpic_version;
        self
    }
}

/// XDG data directory for this tool: `~/.local/share/cpic-data/`.
pub fn data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            env::var("HOME")
                .map(|home| PathBuf::from(home).join(".local/share"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });

    data_home.join("cpic-data")
}

/// Default database file: `<data_dir>/cpic.db`.
pub fn default_db_path() -> PathBuf {
    data_dir().join("cpic.db")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
