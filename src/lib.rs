//! Export and synchronization jobs for the CPIC knowledge base.
//!
//! The crate reads the CPIC relational store and the public data API, writes
//! the versioned files consumed downstream (allele definitions, gene
//! phenotypes, guideline drugs, pair summaries, the change log) and
//! reconciles pair annotations against PharmGKB.

pub mod cli;
pub mod clock;
pub mod config;
pub mod db;
pub mod export;
pub mod rest;
pub mod sync;
pub mod util;
pub mod xref;

/// Genes that are never written to the allele definition or phenotype files.
pub const GENE_DENYLIST: &[&str] = &["G6PD"];
