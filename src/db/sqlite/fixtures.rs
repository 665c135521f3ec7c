//! Shared test fixture: a small slice of CPIC data.
//!
//! - CYP2D6: 2 variants, 3 named alleles (*1 reference, *2, *4) plus a
//!   structural *5 that must never be exported.
//! - CYP2A6: reference definition is structural only, so no named alleles.
//! - G6PD: on the denylist.
//! - Pairs: codeine/CYP2D6 and clopidogrel/CYP2C19 (active), warfarin/CYP2C9 (removed).

use crate::db::{Database, SqliteDatabase};

const SEED: &str = r#"
INSERT INTO gene (symbol, chr, genesequenceid, chromosequenceid, proteinsequenceid) VALUES
    ('CYP2D6', 'chr22', 'NG_008376.4', 'NC_000022.11', 'NP_000097.3'),
    ('CYP2C19', 'chr10', 'NG_008384.3', 'NC_000010.11', 'NP_000760.1'),
    ('CYP2C9', 'chr10', 'NG_008385.2', 'NC_000010.11', 'NP_000762.2'),
    ('CYP2A6', 'chr19', 'NG_008377.1', 'NC_000019.10', 'NP_000753.3'),
    ('G6PD', 'chrX', 'NG_009015.2', 'NC_000023.11', 'NP_001035810.1');

INSERT INTO allele_definition (id, genesymbol, name, reference, matchesreferencesequence, structuralvariation) VALUES
    (1, 'CYP2D6', '*1', 1, 1, 0),
    (2, 'CYP2D6', '*4', 0, 0, 0),
    (3, 'CYP2D6', '*2', 0, 0, 0),
    (4, 'CYP2D6', '*5', 0, 0, 1),
    (20, 'CYP2A6', '*1', 1, 1, 1),
    (40, 'G6PD', 'B (wildtype)', 1, 1, 0);

INSERT INTO sequence_location (id, genesymbol, name, chromosomelocation, genelocation, proteinlocation, position, dbsnpid) VALUES
    (11, 'CYP2D6', '1847G>A', 'g.42128945C>T', '1847G>A', 'splice defect', 42128945, 'rs3892097'),
    (10, 'CYP2D6', '2851C>T', 'g.42126611C>G', '2851C>T', 'R296C', 42126611, 'rs16947'),
    (30, 'CYP2A6', NULL, 'g.40848591del', NULL, NULL, 40848591, NULL),
    (40, 'G6PD', NULL, 'g.154536002C>T', NULL, NULL, 154536002, 'rs1050828');

INSERT INTO allele_location_value (alleledefinitionid, locationid, variantallele) VALUES
    (1, 10, 'C'),
    (1, 11, 'C'),
    (3, 10, 'G'),
    (2, 10, 'G'),
    (2, 11, 'T'),
    (4, 10, 'delGene'),
    (20, 30, 'A'),
    (40, 40, 'C');

INSERT INTO allele (id, genesymbol, name, definitionid, clinicalfunctionalstatus, activityvalue) VALUES
    (1, 'CYP2D6', '*1', 1, 'Normal function', '1.0'),
    (2, 'CYP2D6', '*2', 3, 'Normal function', '1.0'),
    (3, 'CYP2D6', '*4', 2, 'No function', '0.0'),
    (4, 'CYP2C19', '*1', NULL, 'Normal function', NULL),
    (5, 'CYP2C19', '*2', NULL, 'No function', NULL),
    (6, 'CYP2C9', '*1', NULL, NULL, NULL),
    (7, 'G6PD', 'B (wildtype)', 40, 'Normal', NULL);

INSERT INTO diplotype (id, genesymbol, diplotype, generesult, description, lookupkey, diplotypekey) VALUES
    (1, 'CYP2D6', '*1/*4', 'Intermediate Metabolizer', 'One normal, one no function',
        '{"CYP2D6": "1.0"}', '{"CYP2D6": {"*1": 1, "*4": 1}}'),
    (2, 'CYP2D6', '*4/*4', 'Poor Metabolizer', 'Two no function',
        '{"CYP2D6": "0.0"}', '{"CYP2D6": {"*4": 2}}');

INSERT INTO file_note (id, entityid, type, ordinal, note) VALUES
    (1, 'CYP2D6', 'ALLELE_DEFINITION', 2, 'Structural variants are not represented.'),
    (2, 'CYP2D6', 'ALLELE_DEFINITION', 1, 'Positions are on GRCh38.'),
    (3, 'CYP2D6', 'FUNCTION_REFERENCE', 1, 'Not an allele definition note.');

INSERT INTO drug (drugid, name, pharmgkbid) VALUES
    ('RxNorm:2670', 'codeine', 'PA449088'),
    ('RxNorm:32968', 'clopidogrel', 'PA449053'),
    ('RxNorm:11289', 'warfarin', 'PA451906');

INSERT INTO guideline (id, name, url, pharmgkbid, genes, notesonusage) VALUES
    (100, 'CYP2D6, OPRM1, COMT, and Opioids', 'https://cpicpgx.org/guidelines/opioids/',
        '["PA166228121"]', '["CYP2D6", "OPRM1"]', NULL),
    (101, 'CYP2C19 and Clopidogrel', 'https://cpicpgx.org/guidelines/clopidogrel/',
        '["PA166104948"]', '["CYP2C19"]', 'Applies to cardiovascular indications.'),
    (102, 'CYP2C9, VKORC1, CYP4F2 and Warfarin', 'https://cpicpgx.org/guidelines/warfarin/',
        '["PA166104949"]', '["CYP2C9"]', NULL);

INSERT INTO pair (pairid, drugid, genesymbol, guidelineid, cpiclevel, pgkbcalevel, pgxtesting, usedforrecommendation, removed, provisional) VALUES
    (1, 'RxNorm:2670', 'CYP2D6', 100, 'A', '1A', 'Actionable PGx', 1, 0, 0),
    (2, 'RxNorm:32968', 'CYP2C19', 101, 'A', '1A', NULL, 1, 0, 0),
    (3, 'RxNorm:11289', 'CYP2C9', 102, 'A', '1A', 'Actionable PGx', 1, 1, 0);

INSERT INTO recommendation (id, drugid, guidelineid, implications, drugrecommendation, classification, phenotypes, activityscore, allelestatus, lookupkey, population, comments) VALUES
    (1, 'RxNorm:2670', 100, '{"CYP2D6": "Normal morphine formation"}', 'Use label recommended dosing.',
        'Strong', '{"CYP2D6": "Normal Metabolizer"}', '{"CYP2D6": "1.0"}', NULL,
        '{"CYP2D6": "1.0"}', 'general', NULL),
    (2, 'RxNorm:2670', 100, '{"CYP2D6": "Greatly reduced morphine formation"}', 'Avoid codeine use.',
        'Strong', '{"CYP2D6": "Poor Metabolizer"}', '{"CYP2D6": "0.0"}', NULL,
        '{"CYP2D6": "0.0"}', 'general', NULL),
    (3, 'RxNorm:32968', 101, '{"CYP2C19": "Reduced platelet inhibition"}', 'Avoid standard dose clopidogrel.',
        'Strong', '{"CYP2C19": "Poor Metabolizer"}', NULL, NULL,
        '{"CYP2C19": "Poor Metabolizer"}', 'general', NULL);

INSERT INTO publication (id, guidelineid, title, authors, journal, month, year, pmid, pmcid, doi) VALUES
    (1, 100, 'CPIC guideline for opioids', '["Crews KR", "Monte AA"]', 'Clin Pharmacol Ther', 5, 2021, '33387367', 'PMC8249478', '10.1002/cpt.2149'),
    (2, 100, 'CPIC guideline for codeine', '["Crews KR"]', 'Clin Pharmacol Ther', 4, 2014, '24458010', NULL, NULL),
    (3, 101, 'CPIC guideline for clopidogrel', '["Lee CR"]', 'Clin Pharmacol Ther', 7, 2022, '35034351', NULL, NULL);

INSERT INTO change_log (date, type, entityid, note) VALUES
    ('2023-05-01', 'ALLELE_DEFINITION', 'CYP2D6', 'Added *2 definition'),
    ('2024-01-15', 'PAIR', 'RxNorm:2670', 'Level changed'),
    ('2024-01-15', 'ALLELE_FREQUENCY', 'CYP2D6', 'Updated frequencies
for European and
African populations');
"#;

/// Fresh migrated in-memory database without data.
pub(crate) async fn empty_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db
}

/// Fresh migrated in-memory database seeded with the fixture rows.
pub(crate) async fn seeded_db() -> SqliteDatabase {
    let db = empty_db().await;
    sqlx::raw_sql(SEED).execute(db.pool()).await.unwrap();
    db
}

pub(crate) async fn count_rows(db: &SqliteDatabase, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.pool())
        .await
        .unwrap()
}
