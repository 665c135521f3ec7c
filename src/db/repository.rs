//! Repository traits for data access abstraction.
//!
//! Exporters and the sync engine depend on these traits only; the SQLite
//! implementation lives in [`crate::db::sqlite`].

use crate::db::{
    DbResult,
    models::{
        AlleleDefinition, AlleleFunction, AlleleLocationValue, ChangeLogEntry, DefinitionGene,
        Diplotype, GuidelineDrug, PairAnnotation, PairFieldUpdate,
        PairSnapshot, Publication, Recommendation, SequenceLocation,
    },
};

/// Queries behind the allele definition file.
pub trait AlleleRepository {
    /// Genes with at least one reference allele definition, minus the denylist.
    async fn definition_genes(&self, denylist: &[&str]) -> DbResult<Vec<DefinitionGene>>;

    /// Locations used by the gene's reference definition, ordered by position.
    async fn variants(&self, gene: &str) -> DbResult<Vec<SequenceLocation>>;

    /// Distinct values seen at a location among non-structural definitions.
    async fn variant_alleles(&self, location_id: i64) -> DbResult<Vec<String>>;

    /// Non-structural named alleles of a gene.
    async fn named_alleles(&self, gene: &str) -> DbResult<Vec<AlleleDefinition>>;

    /// Every (definition, location, value) triple for a gene.
    async fn location_values(&self, gene: &str) -> DbResult<Vec<AlleleLocationValue>>;

    /// Allele definition notes for a gene, in display order.
    async fn definition_notes(&self, gene: &str) -> DbResult<Vec<String>>;
}

/// Queries behind the gene phenotype file.
pub trait PhenotypeRepository {
    /// Genes that have alleles, minus the denylist.
    async fn genes_with_alleles(&self, denylist: &[&str]) -> DbResult<Vec<String>>;

    /// Alleles with a non-null clinical functional status, ordered by name.
    async fn allele_functions(&self, gene: &str) -> DbResult<Vec<AlleleFunction>>;

    /// Diplotype lookup rows keyed for the gene.
    async fn diplotypes(&self, gene: &str) -> DbResult<Vec<Diplotype>>;
}

/// Queries behind the guideline drug file.
pub trait GuidelineRepository {
    /// Drugs in at least one non-removed, recommendation-bearing pair, ordered by name.
    async fn recommendation_drugs(&self) -> DbResult<Vec<GuidelineDrug>>;

    /// Publications attached to a guideline.
    async fn citations(&self, guideline_id: i64) -> DbResult<Vec<Publication>>;

    /// Recommendations for a drug, ordered by lookup key.
    async fn recommendations(&self, drug_id: &str) -> DbResult<Vec<Recommendation>>;
}

/// Pair reads and the narrow pair write used by sync.
pub trait PairRepository {
    /// All non-removed pairs with drug identity.
    async fn current_pairs(&self) -> DbResult<Vec<PairSnapshot>>;

    /// Stored annotation values for one pair.
    async fn annotation(&self, pair_id: i64) -> DbResult<PairAnnotation>;

    /// Write one pair column and append its change-log entry in one transaction.
    async fn apply_update(&self, update: &PairFieldUpdate) -> DbResult<()>;
}

/// Append-only audit trail. Entries are written with the change they record.
pub trait ChangeLogRepository {
    /// All entries, newest first.
    async fn list(&self) -> DbResult<Vec<ChangeLogEntry>>;
}

/// Combined database interface.
///
/// Repositories are exposed through associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Alleles<'a>: AlleleRepository
    where
        Self: 'a;
    type Phenotypes<'a>: PhenotypeRepository
    where
        Self: 'a;
    type Guidelines<'a>: GuidelineRepository
    where
        Self: 'a;
    type Pairs<'a>: PairRepository
    where
        Self: 'a;
    type ChangeLog<'a>: ChangeLogRepository
    where
        Self: 'a;

    /// Run pending migrations.
    async fn migrate(&self) -> DbResult<()>;

    fn alleles(&self) -> Self::Alleles<'_>;

    fn phenotypes(&self) -> Self::Phenotypes<'_>;

    fn guidelines(&self) -> Self::Guidelines<'_>;

    fn pairs(&self) -> Self::Pairs<'_>;

    fn change_log(&self) -> Self::ChangeLog<'_>;
}
