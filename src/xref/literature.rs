//! Publication rows from PharmGKB literature records.

use serde_json::Value;
use tracing::instrument;

use crate::util::{deep_get, deep_get_string};
use crate::xref::{XrefClient, XrefError, XrefResult};

pub const COPY_HEADER: &str =
    "COPY publication (title, authors, journal, month, page, volume, year, pmid) FROM stdin;";
pub const COPY_END: &str = "\\.";

/// Postgres text-format null marker.
const COPY_NULL: &str = "\\N";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Literature {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub journal: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl Literature {
    /// Read the first record of a literature search, if any.
    pub fn from_response(body: &Value) -> Option<Self> {
        let record = deep_get(body, "data[0]", &Value::Null);
        if record.is_null() {
            return None;
        }

        let authors = record
            .get("authors")
            .and_then(Value::as_array)
            .map(|authors| {
                authors
                    .iter()
                    .filter_map(|a| a.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            title: deep_get_string(record, "title"),
            authors,
            journal: deep_get_string(record, "journal"),
            month: deep_get_string(record, "month"),
            year: deep_get_string(record, "year"),
        })
    }
}

// Escape for one column of COPY text format.
fn copy_field(value: Option<&str>) -> String {
    match value {
        Some(v) => v
            .replace('\\', "\\\\")
            .replace('\t', "\\t")
            .replace('\n', "\\n")
            .replace('\r', "\\r"),
        None => COPY_NULL.to_string(),
    }
}

// Postgres array literal: {"A B","C D"}.
fn array_literal(values: &[String]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("{{{}}}", items.join(","))
}

/// The three-line COPY block for one publication. Page and volume are left empty.
pub fn copy_block(pmid: &str, literature: &Literature) -> String {
    let authors = array_literal(&literature.authors);
    let fields = [
        copy_field(literature.title.as_deref()),
        copy_field(Some(&authors)),
        copy_field(literature.journal.as_deref()),
        copy_field(literature.month.as_deref()),
        String::new(),
        String::new(),
        copy_field(literature.year.as_deref()),
        copy_field(Some(pmid)),
    ];
    format!("{}\n{}\n{}", COPY_HEADER, fields.join("\t"), COPY_END)
}

#[instrument(skip(xref))]
pub async fn lookup_publication(
    xref: &XrefClient,
    literature_url: &str,
    pmid: &str,
) -> XrefResult<String> {
    let body = xref
        .fetch_json(
            literature_url,
            &[
                ("view", "base"),
                ("crossReferences.resourceId", pmid),
                ("crossReferences.resource", "PubMed"),
            ],
        )
        .await?;

    let literature = Literature::from_response(&body).ok_or_else(|| XrefError::NotFound {
        pmid: pmid.to_string(),
    })?;
    Ok(copy_block(pmid, &literature))
}
