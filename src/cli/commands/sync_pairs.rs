use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, counts_table, or_dash, truncate_with_ellipsis};
use crate::clock::Clock;
use crate::db::{Database, PairField};
use crate::sync::{PairAuthority, SyncReport, sync_pairs};

#[derive(Tabled)]
struct ChangeDisplay {
    #[tabled(rename = "Pair")]
    pairid: i64,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Reconcile pair annotations with the authority and describe what happened.
pub async fn sync<D: Database, A: PairAuthority, C: Clock + ?Sized>(
    db: &D,
    authority: &A,
    clock: &C,
) -> CliResult<String> {
    let report = sync_pairs(db, authority, clock).await?;
    Ok(format_report(&report))
}

pub fn format_report(report: &SyncReport) -> String {
    if let Some(error) = &report.authority_error {
        return format!(
            "Error requesting updates: {}\nSubmitted {} pairs; no changes applied.",
            error, report.pairs_submitted
        );
    }

    let mut output = counts_table(&[
        ("Pairs submitted", report.pairs_submitted),
        ("Changes received", report.changes_received),
        ("Ignored (no pair id)", report.without_pair_id),
        (
            "PharmGKB level updates",
            report.applied_for(PairField::PgkbLevel),
        ),
        (
            "PGx testing updates",
            report.applied_for(PairField::PgxTesting),
        ),
        ("Unchanged", report.unchanged),
    ]);

    if !report.applied.is_empty() {
        let rows: Vec<ChangeDisplay> = report
            .applied
            .iter()
            .map(|c| ChangeDisplay {
                pairid: c.pairid,
                field: c.field.to_string(),
                from: or_dash(c.from.as_deref()),
                to: or_dash(c.to.as_deref()),
                note: truncate_with_ellipsis(&c.note, 60),
            })
            .collect();
        let mut table = Table::new(rows);
        apply_table_style(&mut table);
        output.push('\n');
        output.push_str(&table.to_string());
    }

    output
}
