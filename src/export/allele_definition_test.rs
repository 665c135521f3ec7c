use super::allele_definition::*;
use crate::GENE_DENYLIST;
use crate::clock::fixed_clock;
use crate::db::sqlite::fixtures::{empty_db, seeded_db};
use crate::db::{AlleleDefinition, AlleleLocationValue, SequenceLocation};

fn location(id: i64, position: i64) -> SequenceLocation {
    SequenceLocation {
        id,
        chr: Some("chr22".to_string()),
        position,
        dbsnpid: None,
        chromosomelocation: format!("g.{}C>T", position),
        genelocation: None,
        proteinlocation: None,
        name: None,
    }
}

fn definition(id: i64, name: &str, reference: bool) -> AlleleDefinition {
    AlleleDefinition {
        id,
        name: name.to_string(),
        reference,
    }
}

fn value(definition: i64, location: i64, allele: &str) -> AlleleLocationValue {
    AlleleLocationValue {
        alleledefinitionid: definition,
        locationid: location,
        variantallele: allele.to_string(),
    }
}

#[test]
fn classify_by_hgvs_substring() {
    assert_eq!(VariantType::classify("g.42126611C>G"), VariantType::Snp);
    assert_eq!(VariantType::classify("g.94942205_94942206insA"), VariantType::Ins);
    assert_eq!(VariantType::classify("g.40848591del"), VariantType::Del);
    assert_eq!(VariantType::classify("g.100delinsTT"), VariantType::Ins);
}

#[test]
fn variant_type_serializes_upper_case() {
    assert_eq!(serde_json::to_string(&VariantType::Del).unwrap(), "\"DEL\"");
}

#[test]
fn align_fills_missing_positions_with_none() {
    let variants = vec![location(10, 100), location(11, 200), location(12, 300)];
    let definitions = vec![definition(2, "*3", false), definition(1, "*1", true)];
    let values = vec![
        value(1, 10, "C"),
        value(1, 11, "A"),
        value(1, 12, "G"),
        value(2, 12, "T"),
        // value at a location that is not a variant is ignored
        value(2, 99, "X"),
    ];

    let named = align_named_alleles(&variants, definitions, &values);

    assert_eq!(named.len(), 2);
    assert_eq!(named[0].name, "*1");
    assert_eq!(
        named[1].alleles,
        vec![None, None, Some("T".to_string())]
    );
    for allele in &named {
        assert_eq!(allele.alleles.len(), variants.len());
    }
}

#[test]
fn align_puts_reference_first_then_name_order() {
    let variants = vec![location(10, 100)];
    let definitions = vec![
        definition(3, "*2", false),
        definition(4, "*10", false),
        definition(1, "*1", true),
    ];

    let named = align_named_alleles(&variants, definitions, &[]);
    let names: Vec<&str> = named.iter().map(|a| a.name.as_str()).collect();

    assert_eq!(names, vec!["*1", "*10", "*2"]);
    assert!(named[0].reference);
}

#[tokio::test(flavor = "multi_thread")]
async fn cyp2d6_has_three_aligned_named_alleles() {
    let db = seeded_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "v1.40", GENE_DENYLIST)
        .await
        .unwrap();

    let cyp2d6 = export
        .definitions
        .iter()
        .find(|d| d.gene == "CYP2D6")
        .unwrap();
    assert_eq!(cyp2d6.variants.len(), 2);
    assert_eq!(cyp2d6.named_alleles.len(), 3);
    assert_eq!(cyp2d6.named_alleles[0].name, "*1");
    assert!(cyp2d6.named_alleles[0].reference);
    for allele in &cyp2d6.named_alleles {
        assert_eq!(allele.alleles.len(), 2);
    }
    assert_eq!(
        cyp2d6.named_alleles[1].alleles,
        vec![Some("G".to_string()), None]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn record_carries_gene_metadata_and_stamps() {
    let db = seeded_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "v1.40", GENE_DENYLIST)
        .await
        .unwrap();
    let cyp2d6 = &export.definitions[0];

    assert_eq!(cyp2d6.format_version, 1);
    assert_eq!(cyp2d6.cpic_version, "v1.40");
    assert_eq!(cyp2d6.modification_date, "2024-03-09T12:00:00.000Z");
    assert_eq!(cyp2d6.genome_build, "b38");
    assert_eq!(cyp2d6.chromosome.as_deref(), Some("chr22"));
    assert_eq!(cyp2d6.ref_seq_chromosome_id.as_deref(), Some("NC_000022.11"));
    assert_eq!(
        cyp2d6.notes,
        vec![
            "Positions are on GRCh38.",
            "Structural variants are not represented."
        ]
    );
    assert_eq!(cyp2d6.variants[0].rsid.as_deref(), Some("rs16947"));
    assert_eq!(cyp2d6.variants[0].sequence_location_id, 10);
    assert_eq!(cyp2d6.variants[0].variant_type, VariantType::Snp);
    assert_eq!(
        cyp2d6.variant_alleles,
        vec![vec!["C", "G"], vec!["C", "T"]]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn gene_without_named_alleles_is_skipped() {
    let db = seeded_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "dev", GENE_DENYLIST)
        .await
        .unwrap();
    let genes: Vec<&str> = export.definitions.iter().map(|d| d.gene.as_str()).collect();

    assert_eq!(genes, vec!["CYP2D6"]);
    assert_eq!(export.skipped, vec!["CYP2A6"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn reference_without_location_values_is_skipped() {
    let db = seeded_db().await;
    sqlx::raw_sql(
        "INSERT INTO gene (symbol, chr) VALUES ('NUDT15', 'chr13');
         INSERT INTO allele_definition (id, genesymbol, name, reference, matchesreferencesequence, structuralvariation)
         VALUES (50, 'NUDT15', '*1', 1, 1, 0);",
    )
    .execute(db.pool())
    .await
    .unwrap();
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "dev", GENE_DENYLIST)
        .await
        .unwrap();
    let genes: Vec<&str> = export.definitions.iter().map(|d| d.gene.as_str()).collect();

    assert_eq!(genes, vec!["CYP2D6"]);
    assert_eq!(export.skipped, vec!["CYP2A6", "NUDT15"]);
    assert!(!export.haplotype_id_list().contains("NUDT15"));
}

#[tokio::test(flavor = "multi_thread")]
async fn query_error_aborts_the_export() {
    let db = seeded_db().await;
    sqlx::raw_sql("DROP TABLE allele_location_value;")
        .execute(db.pool())
        .await
        .unwrap();
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let result = export_allele_definitions(&db, &clock, "dev", GENE_DENYLIST).await;

    assert!(
        matches!(result, Err(crate::db::DbError::Database { .. })),
        "Expected a database error, got: {:?}",
        result.map(|e| e.skipped)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn denylist_is_caller_supplied() {
    let db = seeded_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "dev", &[])
        .await
        .unwrap();
    let genes: Vec<&str> = export.definitions.iter().map(|d| d.gene.as_str()).collect();

    assert_eq!(genes, vec!["CYP2D6", "G6PD"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_database_exports_nothing() {
    let db = empty_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "dev", GENE_DENYLIST)
        .await
        .unwrap();

    assert!(export.definitions.is_empty());
    assert_eq!(export.haplotype_id_list(), "gene\tallele\tID");
}

#[tokio::test(flavor = "multi_thread")]
async fn haplotype_id_list_rows_follow_named_allele_order() {
    let db = seeded_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "dev", GENE_DENYLIST)
        .await
        .unwrap();

    assert_eq!(
        export.haplotype_id_list(),
        "gene\tallele\tID\nCYP2D6\t*1\t1\nCYP2D6\t*2\t3\nCYP2D6\t*4\t2"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn json_field_names_are_camel_case() {
    let db = seeded_db().await;
    let clock = fixed_clock("2024-03-09T12:00:00Z");

    let export = export_allele_definitions(&db, &clock, "dev", GENE_DENYLIST)
        .await
        .unwrap();
    let json = serde_json::to_value(&export.definitions[0]).unwrap();

    assert_eq!(json["formatVersion"], 1);
    assert_eq!(json["refSeqGeneId"], "NG_008376.4");
    assert_eq!(json["variants"][0]["chromosomeHgvsName"], "g.42126611C>G");
    assert_eq!(json["variants"][0]["type"], "SNP");
    assert!(json["variants"][0]["referenceRepeat"].is_null());
    assert_eq!(json["namedAlleles"][0]["id"], "1");
    assert!(json["namedAlleles"][1]["alleles"][1].is_null());
}
