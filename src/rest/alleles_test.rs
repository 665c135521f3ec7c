use super::alleles::*;

fn row(gene: &str, allele: &str, guideline: &str) -> AlleleGuidelineRow {
    AlleleGuidelineRow {
        genesymbol: gene.to_string(),
        allele_name: allele.to_string(),
        guideline_name: guideline.to_string(),
        guideline_url: Some(format!("https://cpicpgx.org/{}", guideline.to_lowercase())),
    }
}

#[test]
fn alleles_are_unique_with_all_guidelines() {
    let rows = vec![
        row("CYP2D6", "*4", "Codeine"),
        row("CYP2C19", "*2", "Clopidogrel"),
        row("CYP2D6", "*4", "Ondansetron"),
    ];

    let alleles = collect_alleles(&rows);

    assert_eq!(alleles.len(), 2);
    assert_eq!(alleles[0].allele.name, "*4");
    assert_eq!(alleles[0].allele.gene.symbol, "CYP2D6");
    let titles: Vec<&str> = alleles[0]
        .guidelines
        .iter()
        .map(|g| g.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Codeine", "Ondansetron"]);
    assert_eq!(alleles[1].guidelines.len(), 1);
}

#[test]
fn same_allele_name_in_two_genes_stays_separate() {
    let rows = vec![row("CYP2C9", "*2", "Warfarin"), row("CYP2C19", "*2", "Clopidogrel")];
    assert_eq!(collect_alleles(&rows).len(), 2);
}

#[test]
fn csv_has_one_line_per_row_and_quotes_commas() {
    let rows = vec![
        row("CYP2D6", "*4", "Codeine"),
        AlleleGuidelineRow {
            genesymbol: "CYP2D6".to_string(),
            allele_name: "*10".to_string(),
            guideline_name: "CYP2D6, OPRM1, COMT, and Opioids".to_string(),
            guideline_url: None,
        },
    ];

    let csv = render_csv(&rows).unwrap();

    assert_eq!(
        csv,
        "Gene,Allele,Guideline,URL\n\
         CYP2D6,*4,Codeine,https://cpicpgx.org/codeine\n\
         CYP2D6,*10,\"CYP2D6, OPRM1, COMT, and Opioids\","
    );
}
