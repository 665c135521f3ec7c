//! SQLite implementation of the database traits.

mod allele;
mod change_log;
mod connection;
mod guideline;
mod pair;
mod phenotype;

#[cfg(test)]
pub(crate) mod fixtures;


pub use allele::SqliteAlleleRepository;
pub use change_log::SqliteChangeLogRepository;
pub use connection::SqliteDatabase;
pub use guideline::SqliteGuidelineRepository;
pub use pair::SqlitePairRepository;
pub use phenotype::SqlitePhenotypeRepository;
