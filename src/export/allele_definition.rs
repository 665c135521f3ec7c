//! Allele definition export (`allele_definitions.json`, `haplotype_id_list.tsv`).
//!
//! One record per gene with a reference definition. The `alleles` array of
//! every named allele is aligned position-for-position with `variants`.

use std::collections::HashMap;

use chrono::SecondsFormat;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::clock::Clock;
use crate::db::{
    AlleleDefinition, AlleleLocationValue, AlleleRepository, Database, DbResult, SequenceLocation,
};

pub const FORMAT_VERSION: u32 = 1;
pub const GENOME_BUILD: &str = "b38";
pub const HAPLOTYPE_ID_HEADER: &str = "gene\tallele\tID";

/// Variant type inferred from the chromosomal HGVS notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantType {
    #[serde(rename = "SNP")]
    Snp,
    #[serde(rename = "INS")]
    Ins,
    #[serde(rename = "DEL")]
    Del,
}

impl VariantType {
    /// `ins` wins over `del`, so delins notation classifies as an insertion.
    pub fn classify(hgvs: &str) -> Self {
        if hgvs.contains("ins") {
            VariantType::Ins
        } else if hgvs.contains("del") {
            VariantType::Del
        } else {
            VariantType::Snp
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDescriptor {
    pub chromosome: Option<String>,
    pub position: i64,
    pub rsid: Option<String>,
    pub chromosome_hgvs_name: String,
    pub gene_hgvs_name: Option<String>,
    pub protein_note: Option<String>,
    pub resource_note: Option<String>,
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    pub reference_repeat: Option<String>,
    pub sequence_location_id: i64,
}

impl From<&SequenceLocation> for VariantDescriptor {
    fn from(location: &SequenceLocation) -> Self {
        Self {
            chromosome: location.chr.clone(),
            position: location.position,
            rsid: location.dbsnpid.clone(),
            chromosome_hgvs_name: location.chromosomelocation.clone(),
            gene_hgvs_name: location.genelocation.clone(),
            protein_note: location.proteinlocation.clone(),
            resource_note: location.name.clone(),
            variant_type: VariantType::classify(&location.chromosomelocation),
            reference_repeat: None,
            sequence_location_id: location.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAllele {
    pub name: String,
    pub id: String,
    pub alleles: Vec<Option<String>>,
    pub reference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneAlleleDefinition {
    pub format_version: u32,
    pub cpic_version: String,
    pub modification_date: String,
    pub gene: String,
    pub chromosome: Option<String>,
    pub genome_build: String,
    pub ref_seq_chromosome_id: Option<String>,
    pub ref_seq_gene_id: Option<String>,
    pub ref_seq_protein_id: Option<String>,
    pub notes: Vec<String>,
    pub variants: Vec<VariantDescriptor>,
    pub variant_alleles: Vec<Vec<String>>,
    pub named_alleles: Vec<NamedAllele>,
}

/// Result of one allele definition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlleleDefinitionExport {
    pub definitions: Vec<GeneAlleleDefinition>,
    /// Genes skipped because they had no named alleles.
    pub skipped: Vec<String>,
}

impl AlleleDefinitionExport {
    /// Tab-separated (gene, allele, definition id) listing with header.
    pub fn haplotype_id_list(&self) -> String {
        let mut lines = vec![HAPLOTYPE_ID_HEADER.to_string()];
        for definition in &self.definitions {
            for allele in &definition.named_alleles {
                lines.push(format!("{}\t{}\t{}", definition.gene, allele.name, allele.id));
            }
        }
        lines.join("\n")
    }
}

/// Build named alleles whose value arrays follow `variants` order.
///
/// A definition with no value at a position gets `None` there. Output is
/// sorted reference first, then by name.
pub fn align_named_alleles(
    variants: &[SequenceLocation],
    definitions: Vec<AlleleDefinition>,
    values: &[AlleleLocationValue],
) -> Vec<NamedAllele> {
    let lookup: HashMap<(i64, i64), &str> = values
        .iter()
        .map(|v| ((v.alleledefinitionid, v.locationid), v.variantallele.as_str()))
        .collect();

    let mut named: Vec<NamedAllele> = definitions
        .into_iter()
        .map(|definition| NamedAllele {
            alleles: variants
                .iter()
                .map(|variant| {
                    lookup
                        .get(&(definition.id, variant.id))
                        .map(|value| value.to_string())
                })
                .collect(),
            id: definition.id.to_string(),
            name: definition.name,
            reference: definition.reference,
        })
        .collect();

    named.sort_by(|a, b| b.reference.cmp(&a.reference).then_with(|| a.name.cmp(&b.name)));
    named
}

/// Query and assemble allele definitions for every eligible gene.
///
/// A gene with zero named alleles or zero variant locations is logged and
/// skipped; any query error aborts the whole export.
#[instrument(skip(db, clock))]
pub async fn export_allele_definitions<D: Database, C: Clock + ?Sized>(
    db: &D,
    clock: &C,
    cpic_version: &str,
    denylist: &[&str],
) -> DbResult<AlleleDefinitionExport> {
    let repo = db.alleles();
    let modification_date = clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut export = AlleleDefinitionExport::default();

    for gene in repo.definition_genes(denylist).await? {
        let definitions = repo.named_alleles(&gene.symbol).await?;
        if definitions.is_empty() {
            warn!("No alleles exist for {}", gene.symbol);
            export.skipped.push(gene.symbol);
            continue;
        }

        let variants = repo.variants(&gene.symbol).await?;
        if variants.is_empty() {
            warn!("No alleles exist for {}", gene.symbol);
            export.skipped.push(gene.symbol);
            continue;
        }

        let variant_alleles =
            try_join_all(variants.iter().map(|v| repo.variant_alleles(v.id))).await?;
        let values = repo.location_values(&gene.symbol).await?;
        let notes = repo.definition_notes(&gene.symbol).await?;

        export.definitions.push(GeneAlleleDefinition {
            format_version: FORMAT_VERSION,
            cpic_version: cpic_version.to_string(),
            modification_date: modification_date.clone(),
            chromosome: gene.chr,
            genome_build: GENOME_BUILD.to_string(),
            ref_seq_chromosome_id: gene.chromosequenceid,
            ref_seq_gene_id: gene.genesequenceid,
            ref_seq_protein_id: gene.proteinsequenceid,
            notes,
            variants: variants.iter().map(VariantDescriptor::from).collect(),
            variant_alleles,
            named_alleles: align_named_alleles(&variants, definitions, &values),
            gene: gene.symbol,
        });
    }

    Ok(export)
}
