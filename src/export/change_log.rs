//! Change-log report (`data.txt`).

use crate::db::ChangeLogEntry;

pub const CHANGE_LOG_HEADER: &str = "Date of Change\tType of Data\tSubject\tNote of Change";

const CONTINUATION: &str = "\n\t\t\t";

/// Render entries as tab-separated rows, newest first.
///
/// Ordering is date descending, then type, subject and note ascending.
/// Embedded newlines (LF or CRLF) in a note continue under the note column.
pub fn render_change_log(mut entries: Vec<ChangeLogEntry>) -> String {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.change_type.cmp(&b.change_type))
            .then_with(|| a.entityname.cmp(&b.entityname))
            .then_with(|| a.note.cmp(&b.note))
    });

    let mut out = String::from(CHANGE_LOG_HEADER);
    out.push('\n');
    for entry in &entries {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            entry.date.format("%Y-%m-%d"),
            entry.change_type,
            entry.entityname,
            entry.note.replace("\r\n", "\n").replace('\n', CONTINUATION)
        ));
    }
    out
}
