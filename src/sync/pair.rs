//! Pair synchronization engine.
//!
//! Submits the current pair snapshot to the authority and writes back only the
//! proposed values that differ from what is stored. Each write carries its
//! change-log entry in the same transaction.

use futures_util::future::try_join_all;
use tracing::{debug, error, info, instrument};

use crate::clock::Clock;
use crate::db::{
    CHANGE_TYPE_PAIR, Database, DbResult, NewChangeLogEntry, PairField, PairFieldUpdate,
    PairRepository,
};
use crate::sync::SyncError;
use crate::sync::authority::{PairAuthority, ProposedChange};
use crate::sync::normalize::{display_value, normalize};
use crate::util::find_unique;

/// A write that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    pub pairid: i64,
    pub field: PairField,
    pub from: Option<String>,
    pub to: Option<String>,
    pub note: String,
}

/// Outcome of one synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub pairs_submitted: usize,
    pub changes_received: usize,
    /// Proposals dropped for lacking a pair id.
    pub without_pair_id: usize,
    pub applied: Vec<AppliedChange>,
    /// Proposals that matched the stored value after normalization.
    pub unchanged: usize,
    /// Set when the authority could not be reached; nothing was written.
    pub authority_error: Option<String>,
}

impl SyncReport {
    pub fn applied_for(&self, field: PairField) -> usize {
        self.applied.iter().filter(|c| c.field == field).count()
    }
}

enum Outcome {
    Applied(AppliedChange),
    Unchanged,
}

/// Change-log note for one field change.
pub fn change_note(
    field: PairField,
    drug: &str,
    gene: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> String {
    format!(
        "{} for {}-{} changed from {} to {}",
        field.label(),
        drug,
        gene,
        display_value(from),
        display_value(to)
    )
}

/// Run one synchronization pass.
///
/// An authority failure is logged and ends the run with zero writes. A
/// failure writing any single pair propagates.
#[instrument(skip_all)]
pub async fn sync_pairs<D, A, C>(db: &D, authority: &A, clock: &C) -> Result<SyncReport, SyncError>
where
    D: Database,
    A: PairAuthority,
    C: Clock + ?Sized,
{
    let pairs = db.pairs();
    let snapshot = pairs.current_pairs().await?;
    info!("{} pairs in CPIC", snapshot.len());

    let mut report = SyncReport {
        pairs_submitted: snapshot.len(),
        ..SyncReport::default()
    };

    let proposals = match authority.propose_changes(&snapshot).await {
        Ok(proposals) => proposals,
        Err(e) => {
            error!("Error requesting updates: {}", e);
            report.authority_error = Some(e.to_string());
            return Ok(report);
        }
    };

    let (updates, orphans): (Vec<ProposedChange>, Vec<ProposedChange>) =
        proposals.into_iter().partition(|c| c.pairid.is_some());
    report.changes_received = updates.len();
    report.without_pair_id = orphans.len();
    info!("{} changes found in PharmGKB", updates.len());

    let today = clock.now().date_naive();
    for field in PairField::ALL {
        let batch = find_unique(
            updates
                .iter()
                .filter_map(|c| Some((c.pairid?, c.proposal(field)?))),
            |(pairid, _)| *pairid,
        );

        let outcomes = try_join_all(
            batch
                .into_iter()
                .map(|(pairid, proposed)| reconcile(&pairs, field, pairid, proposed, today)),
        )
        .await?;

        for outcome in outcomes {
            match outcome {
                Outcome::Applied(change) => report.applied.push(change),
                Outcome::Unchanged => report.unchanged += 1,
            }
        }
    }

    Ok(report)
}

// Read current, compare normalized, write only on difference.
async fn reconcile<P: PairRepository>(
    pairs: &P,
    field: PairField,
    pairid: i64,
    proposed: &str,
    today: chrono::NaiveDate,
) -> DbResult<Outcome> {
    let annotation = pairs.annotation(pairid).await?;
    let current = normalize(field.current(&annotation));
    let proposed = normalize(Some(proposed));

    if current == proposed {
        debug!("pair {} {} already {}", pairid, field, display_value(current.as_deref()));
        return Ok(Outcome::Unchanged);
    }

    let note = change_note(
        field,
        &annotation.drugname,
        &annotation.genesymbol,
        current.as_deref(),
        proposed.as_deref(),
    );
    info!("Updating {} {} to {}", pairid, field, display_value(proposed.as_deref()));

    pairs
        .apply_update(&PairFieldUpdate {
            pairid,
            field,
            value: proposed.clone(),
            log: NewChangeLogEntry {
                date: today,
                change_type: CHANGE_TYPE_PAIR.to_string(),
                entity_id: Some(annotation.drugid.clone()),
                note: note.clone(),
            },
        })
        .await?;

    Ok(Outcome::Applied(AppliedChange {
        pairid,
        field,
        from: current,
        to: proposed,
        note,
    }))
}
