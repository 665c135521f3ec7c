//! Pair synchronization against PharmGKB.
//!
//! - `authority`: the proposal source trait and its HTTP client
//! - `normalize`: canonical comparison form of annotation values
//! - `pair`: the read-compare-write engine

pub mod authority;
pub mod normalize;
pub mod pair;


use miette::Diagnostic;
use thiserror::Error;

pub use authority::{AuthorityError, PairAuthority, PharmGkbClient, ProposedChange};
pub use pair::{AppliedChange, SyncReport, sync_pairs};

#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] crate::db::DbError),
}
