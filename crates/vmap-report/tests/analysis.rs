//! Analysis behavior over curated mapping tables.

use vmap_model::{ElementDefinition, ElementIndex, Equivalence, MappingRecord};
use vmap_report::{
    DEFAULT_EXCLUSIONS, ReportError, analyze_mapping, analyze_mapping_folded, combine_analyses,
};

fn record(source: &str, equivalence: Equivalence, comment: Option<&str>) -> MappingRecord {
    MappingRecord {
        source_code: source.to_string(),
        equivalence,
        concept_id: Some(1),
        comment: comment.map(ToString::to_string),
    }
}

fn fixture_records() -> Vec<MappingRecord> {
    vec![
        record("EPIC#1", Equivalence::Equal, None),
        record("EPIC#2", Equivalence::Wider, Some("LATERALITY lost in target")),
        record(
            "EPIC#3",
            Equivalence::Wider,
            Some("CONCEPTMISSING and LATERALITY"),
        ),
        record("EPIC#4", Equivalence::Unmatched, Some("NOMATCH in LOINC")),
        record("EPIC#5", Equivalence::Unmatched, Some("SUBFIELD of visit note")),
        record("EPIC#6", Equivalence::Narrower, Some("checked against SNOMED")),
    ]
}

#[test]
fn detailed_analysis_counts_by_flag() {
    let analysis = analyze_mapping(&fixture_records(), &DEFAULT_EXCLUSIONS).expect("analyze");

    assert_eq!(analysis.equivalence["EQUAL"], 1);
    assert_eq!(analysis.equivalence["WIDER"], 2);
    assert_eq!(analysis.equivalence["NARROWER"], 1);
    assert_eq!(analysis.equivalence["UNMATCHED"], 2);

    assert_eq!(analysis.unmapped["NOMATCH"], 1);
    assert_eq!(analysis.unmapped["SUBFIELD"], 1);
    // Flags that never occur are omitted rather than reported as zero.
    assert!(!analysis.unmapped.contains_key("VALSMAPPED"));
    assert!(!analysis.unmapped.contains_key("INDIRECT"));

    assert_eq!(analysis.wider["LATERALITY"], 1);
    assert_eq!(analysis.wider["CONCEPTMISSING"], 0);
    assert_eq!(analysis.wider["CONCEPTMISSING&LATERALITY"], 1);
}

#[test]
fn flag_on_wrong_equivalence_is_rejected() {
    let records = vec![record("EPIC#1", Equivalence::Equal, Some("NOMATCH though"))];
    let error = analyze_mapping(&records, &DEFAULT_EXCLUSIONS).expect_err("inconsistent flag");
    assert!(matches!(
        error,
        ReportError::FlagEquivalence { ref flag, .. } if flag == "NOMATCH"
    ));
}

#[test]
fn folded_analysis_buckets_free_text_elements_into_other() {
    let elements = ElementIndex::from_definitions(vec![
        ElementDefinition {
            exam_area: "Visit".to_string(),
            data_element: "Comments".to_string(),
            cui: "EPIC#4".to_string(),
        },
        ElementDefinition {
            exam_area: "Pupils".to_string(),
            data_element: "Shape".to_string(),
            cui: "EPIC#7".to_string(),
        },
    ])
    .expect("element index");

    let mut records = fixture_records();
    records.push(record("EPIC#7", Equivalence::Unmatched, Some("NOMATCH")));

    let analysis =
        analyze_mapping_folded(&records, &DEFAULT_EXCLUSIONS, &elements).expect("analyze");
    // SUBFIELD row plus the Comments-element NOMATCH row fold into OTHER;
    // the NOMATCH on a structured element stays NOMATCH.
    assert_eq!(analysis.unmapped["OTHER"], 2);
    assert_eq!(analysis.unmapped["NOMATCH"], 1);
    assert_eq!(analysis.unmapped.len(), 2);
}

#[test]
fn combined_analyses_sum_per_key() {
    let elements_run = analyze_mapping(&fixture_records(), &DEFAULT_EXCLUSIONS).expect("analyze");
    let values_run = analyze_mapping(
        &[record("12", Equivalence::Unmatched, Some("NOMATCH"))],
        &DEFAULT_EXCLUSIONS,
    )
    .expect("analyze");

    let combined = combine_analyses(&elements_run, &values_run);
    assert_eq!(combined.unmapped["NOMATCH"], 2);
    assert_eq!(combined.equivalence["UNMATCHED"], 3);
    assert_eq!(combined.equivalence["EQUAL"], 1);
}

#[test]
fn analysis_serializes_for_downstream_reports() {
    let analysis = analyze_mapping(&fixture_records(), &DEFAULT_EXCLUSIONS).expect("analyze");
    let json = serde_json::to_value(&analysis).expect("serialize");
    assert_eq!(json["equivalence"]["WIDER"], 2);
    assert_eq!(json["wider"]["CONCEPTMISSING&LATERALITY"], 1);
}
