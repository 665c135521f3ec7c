//! Row records returned by the repositories.
//!
//! Each struct mirrors exactly one query shape. JSON columns are carried as
//! `sqlx::types::Json`, which serializes transparently.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;

// =============================================================================
// Allele definitions
// =============================================================================

/// A gene that has at least one reference allele definition.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DefinitionGene {
    pub symbol: String,
    pub chr: Option<String>,
    pub genesequenceid: Option<String>,
    pub chromosequenceid: Option<String>,
    pub proteinsequenceid: Option<String>,
}

/// A variant position used by the reference allele of a gene.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SequenceLocation {
    pub id: i64,
    pub chr: Option<String>,
    pub position: i64,
    pub dbsnpid: Option<String>,
    pub chromosomelocation: String,
    pub genelocation: Option<String>,
    pub proteinlocation: Option<String>,
    pub name: Option<String>,
}

/// A non-structural named allele definition.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AlleleDefinition {
    pub id: i64,
    pub name: String,
    pub reference: bool,
}

/// The value a definition carries at one location.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AlleleLocationValue {
    pub alleledefinitionid: i64,
    pub locationid: i64,
    pub variantallele: String,
}

// =============================================================================
// Phenotypes
// =============================================================================

/// Allele with a clinical functional status.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AlleleFunction {
    pub name: String,
    pub clinicalfunctionalstatus: String,
    pub activityvalue: Option<String>,
}

/// One diplotype-to-result lookup row, keyed for a single gene.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Diplotype {
    pub diplotype: String,
    pub generesult: Option<String>,
    pub description: Option<String>,
    pub lookupkey: Option<String>,
    pub diplotypekey: Option<Json<Value>>,
}

// =============================================================================
// Guidelines
// =============================================================================

/// A drug with a recommendation-bearing pair and its guideline metadata.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GuidelineDrug {
    pub drugid: String,
    pub drugname: String,
    pub guidelineid: i64,
    pub guidelinename: String,
    pub url: Option<String>,
    pub pharmgkbids: Json<Vec<String>>,
    pub genes: Json<Vec<String>>,
    pub notesonusage: Option<String>,
}

/// A guideline publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Publication {
    pub id: i64,
    pub guidelineid: Option<i64>,
    pub title: Option<String>,
    pub authors: Json<Vec<String>>,
    pub journal: Option<String>,
    pub month: Option<i64>,
    pub page: Option<String>,
    pub volume: Option<String>,
    pub year: Option<i64>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
}

/// Clinical guidance for a drug, keyed by the phenotype lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Recommendation {
    pub implications: Option<Json<Value>>,
    pub drugrecommendation: Option<String>,
    pub classification: Option<String>,
    pub phenotypes: Option<Json<Value>>,
    pub activityscore: Option<Json<Value>>,
    pub allelestatus: Option<Json<Value>>,
    pub lookupkey: Json<Value>,
    pub comments: Option<String>,
    pub population: Option<String>,
}

impl Recommendation {
    /// Gene symbols named by the lookup key.
    pub fn lookup_genes(&self) -> Vec<String> {
        match &self.lookupkey.0 {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Pairs
// =============================================================================

/// Drug identity sent along with each pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugRef {
    pub drugid: String,
    pub name: String,
    pub pharmgkbid: Option<String>,
}

/// Current state of a non-removed pair, as submitted to the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub drug: DrugRef,
    pub genesymbol: String,
    pub pgkbcalevel: Option<String>,
    pub pgxtesting: Option<String>,
    pub pairid: i64,
}

/// Stored annotation values of one pair, re-read before each update.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PairAnnotation {
    pub pairid: i64,
    pub drugid: String,
    pub drugname: String,
    pub genesymbol: String,
    pub pgkbcalevel: Option<String>,
    pub pgxtesting: Option<String>,
}

/// The two pair columns the sync engine is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairField {
    PgkbLevel,
    PgxTesting,
}

impl PairField {
    pub const ALL: [PairField; 2] = [PairField::PgkbLevel, PairField::PgxTesting];

    /// Column name in the `pair` table.
    pub fn column(&self) -> &'static str {
        match self {
            PairField::PgkbLevel => "pgkbcalevel",
            PairField::PgxTesting => "pgxtesting",
        }
    }

    /// Human label used in change-log notes.
    pub fn label(&self) -> &'static str {
        match self {
            PairField::PgkbLevel => "PharmGKB level of evidence",
            PairField::PgxTesting => "PGx testing recommendation",
        }
    }

    pub fn current<'a>(&self, annotation: &'a PairAnnotation) -> Option<&'a str> {
        match self {
            PairField::PgkbLevel => annotation.pgkbcalevel.as_deref(),
            PairField::PgxTesting => annotation.pgxtesting.as_deref(),
        }
    }
}

impl fmt::Display for PairField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A single-column pair write, always recorded with its change-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFieldUpdate {
    pub pairid: i64,
    pub field: PairField,
    pub value: Option<String>,
    pub log: NewChangeLogEntry,
}

// =============================================================================
// Change log
// =============================================================================

pub const CHANGE_TYPE_PAIR: &str = "PAIR";

/// A rendered audit record from `change_log_view`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ChangeLogEntry {
    pub date: NaiveDate,
    #[sqlx(rename = "type")]
    pub change_type: String,
    pub entityname: String,
    pub note: String,
}

/// An audit record to append to `change_log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChangeLogEntry {
    pub date: NaiveDate,
    pub change_type: String,
    pub entity_id: Option<String>,
    pub note: String,
}
