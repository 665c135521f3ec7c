mod commands;
pub mod error;
pub mod utils;

#[cfg(test)]
mod utils_test;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clock::SystemClock;
use crate::config::Config;
use crate::db::{Database, SqliteDatabase};
use crate::rest::CpicApiClient;
use crate::sync::PharmGkbClient;
use crate::xref::XrefClient;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "cpic")]
#[command(author, version, about = "CPIC data export and sync jobs", long_about = None)]
pub struct Cli {
    /// Database file (default: CPIC_DB env or ~/.local/share/cpic-data/cpic.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Override the data API URL (default: CPIC_API_URL env, or API=dev for localhost)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// CPIC release stamped into exported files (default: CPIC_VERSION env or "dev")
    #[arg(long, global = true)]
    pub cpic_version: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write allele definitions, gene phenotypes and drug recommendations
    Definitions {
        /// Directory to write output to
        #[arg(short, long, default_value = ".")]
        output_path: PathBuf,
    },
    /// Write the change log report
    Changelog {
        /// Output file
        #[arg(default_value = "data.txt")]
        path: PathBuf,
    },
    /// Apply PharmGKB pair annotation changes
    SyncPairs,
    /// Write cpicPairs.json and cpicPairs.csv from the data API
    Pairs {
        /// Output directory
        dir: PathBuf,
    },
    /// Write the allele to guideline listing from the data API
    Alleles {
        /// JSON output file
        json_path: PathBuf,
        /// CSV output file
        csv_path: PathBuf,
    },
    /// Write guidelines.json from the data API
    Guidelines {
        /// Output directory
        dir: PathBuf,
    },
    /// Write publications.json and featured publication files from the data API
    Publications {
        /// Output directory
        dir: PathBuf,
    },
    /// Write alleles, guidelines and pairs for the website
    SiteData {
        /// Output directory
        dir: PathBuf,
    },
    /// Print SQL filling in HGNC, NCBI and Ensembl ids for genes
    UpdateGenes,
    /// Print SQL filling in PMC ids and DOIs for publications
    UpdatePublications,
    /// Print a COPY block for one publication from PharmGKB
    LookupPublication {
        /// PubMed id
        pmid: String,
    },
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cpic_data=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn open_database(config: &Config) -> CliResult<SqliteDatabase> {
    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let db = SqliteDatabase::open(&config.db_path).await?;
    db.migrate().await?;
    Ok(db)
}

pub async fn run() -> miette::Result<()> {
    let _ = rustls::crypto::ring::default_provider().install_default();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(cpic_version) = cli.cpic_version {
        config = config.with_cpic_version(cpic_version);
    }

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["cpic", "--help"]);
        return Ok(());
    };

    let output = dispatch(command, &config).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

async fn dispatch(command: Commands, config: &Config) -> CliResult<String> {
    let clock = SystemClock;
    let api = || CpicApiClient::new(config.api_url.clone());

    match command {
        Commands::Definitions { output_path } => {
            let db = open_database(config).await?;
            let result =
                commands::definitions::definitions(&db, &clock, &config.cpic_version, &output_path)
                    .await;
            db.close().await;
            result
        }
        Commands::Changelog { path } => {
            let db = open_database(config).await?;
            let result = commands::definitions::changelog(&db, &path).await;
            db.close().await;
            result
        }
        Commands::SyncPairs => {
            let db = open_database(config).await?;
            let authority = PharmGkbClient::new(config.pgkb_url.clone());
            let result = commands::sync_pairs::sync(&db, &authority, &clock).await;
            db.close().await;
            result
        }
        Commands::Pairs { dir } => commands::site::pairs(&api(), &clock, &dir).await,
        Commands::Alleles {
            json_path,
            csv_path,
        } => commands::site::alleles(&api(), &json_path, &csv_path).await,
        Commands::Guidelines { dir } => commands::site::guidelines(&api(), &dir).await,
        Commands::Publications { dir } => commands::site::publications(&api(), &dir).await,
        Commands::SiteData { dir } => commands::site::site_data(&api(), &clock, &dir).await,
        Commands::UpdateGenes => {
            commands::xref::update_genes(&api(), &XrefClient::new(), &config.hgnc_url).await
        }
        Commands::UpdatePublications => {
            commands::xref::update_publications(&api(), &XrefClient::new(), &config.ncbi_idconv_url)
                .await
        }
        Commands::LookupPublication { pmid } => {
            commands::xref::lookup_publication(&XrefClient::new(), &config.pgkb_literature_url, &pmid)
                .await
        }
    }
}
