//! Shared utilities for CLI commands

use std::path::{Path, PathBuf};

use tabled::{Table, Tabled, settings::Style};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Display an optional value, `-` when absent
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

#[derive(Tabled)]
pub struct FileRow {
    #[tabled(rename = "Written")]
    pub path: String,
}

/// Render written paths as a table, or a note when nothing was written.
pub fn files_table(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "No files written.".to_string();
    }
    let rows: Vec<FileRow> = paths
        .iter()
        .map(|p| FileRow {
            path: p.display().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

#[derive(Tabled)]
pub struct CountRow {
    #[tabled(rename = "Item")]
    pub item: String,
    #[tabled(rename = "Count")]
    pub count: usize,
}

pub fn counts_table(counts: &[(&str, usize)]) -> String {
    let rows: Vec<CountRow> = counts
        .iter()
        .map(|(item, count)| CountRow {
            item: item.to_string(),
            count: *count,
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create an output directory and its parents.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(path)
}
