//! File-backed loader tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use vmap_ingest::{
    IngestError, load_candidate_pairs, load_concepts, load_element_index, load_mapping_records,
    load_valid_values,
};
use vmap_model::Equivalence;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn concepts_filter_by_vocabulary() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "CONCEPT.csv",
        "concept_id\tconcept_name\tvocabulary_id\tconcept_code\tdomain_id\n\
         4011566\tVisual acuity\tSNOMED\t16830007\tMeasurement\n\
         1001\tAspirin\tRxNorm\t1191\tDrug\n",
    );
    let concepts = load_concepts(&path, &["SNOMED"]).expect("load concepts");
    assert_eq!(concepts.len(), 1);
    assert_eq!(concepts[0].concept_id, 4011566);
    assert_eq!(concepts[0].concept_name, "Visual acuity");
    assert_eq!(concepts[0].concept_code, "16830007");
}

#[test]
fn concepts_missing_column_is_schema_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "CONCEPT.csv",
        "concept_id\tconcept_name\tvocabulary_id\n1\tA\tSNOMED\n",
    );
    let error = load_concepts(&path, &["SNOMED"]).expect_err("missing concept_code");
    assert!(matches!(
        error,
        IngestError::MissingColumn { ref column, .. } if column == "concept_code"
    ));
}

#[test]
fn element_index_resolves_by_cui() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "elements.csv",
        "examArea,dataElement,CUI\nVisual Acuity,Distance,EPIC#VA1\nPupils,Shape,EPIC#PU2\n",
    );
    let index = load_element_index(&path).expect("load element index");
    assert_eq!(index.len(), 2);
    let element = index.get("EPIC#PU2").expect("known CUI");
    assert_eq!(element.exam_area, "Pupils");
    assert_eq!(element.data_element, "Shape");
    assert!(index.get("EPIC#MISSING").is_none());
}

#[test]
fn valid_values_skip_invalidated_records() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "ValueDefinitions.csv",
        "ID,CUI,value,valid,creation_date,invalid_date\n\
         0,EPIC#VA1,20/20,true,2024-01-15,\n\
         1,EPIC#VA1,20/40,False,2024-01-15,2024-06-01\n\
         2,EPIC#PU2,Round,True,2024-02-03,\n",
    );
    let values = load_valid_values(&path).expect("load valid values");
    let ids: Vec<u64> = values.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![0, 2]);
}

#[test]
fn candidate_pairs_require_both_columns() {
    let dir = TempDir::new().expect("tempdir");
    let good = write_file(
        &dir,
        "update.csv",
        "CUI,value,extra\nEPIC#VA1,20/70,x\nEPIC#VA1,20/100,y\n",
    );
    let pairs = load_candidate_pairs(&good).expect("load pairs");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].cui, "EPIC#VA1");
    assert_eq!(pairs[0].value, "20/70");

    let bad = write_file(&dir, "bad.csv", "CUI,notvalue\nEPIC#VA1,x\n");
    let error = load_candidate_pairs(&bad).expect_err("missing value column");
    assert!(matches!(
        error,
        IngestError::MissingColumn { ref column, .. } if column == "value"
    ));
}

#[test]
fn mapping_records_parse_dataframe_style_concept_ids() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "mapping.csv",
        "sourceCode,equivalence,conceptId,comment\n\
         EPIC#VA1,EQUAL,4011566.0,\n\
         EPIC#PU2,WIDER,437232,LATERALITY lost\n\
         EPIC#XX9,UNMATCHED,,NOMATCH in SNOMED\n",
    );
    let records = load_mapping_records(&path).expect("load mapping");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].concept_id, Some(4011566));
    assert_eq!(records[0].comment, None);
    assert_eq!(records[1].equivalence, Equivalence::Wider);
    assert_eq!(records[2].concept_id, None);
    assert_eq!(records[2].comment.as_deref(), Some("NOMATCH in SNOMED"));
}

#[test]
fn mapping_records_reject_unknown_equivalence() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "mapping.csv",
        "sourceCode,equivalence,conceptId,comment\nEPIC#VA1,SIMILAR,1,\n",
    );
    let error = load_mapping_records(&path).expect_err("unknown equivalence");
    assert!(matches!(
        error,
        IngestError::InvalidField { ref field, .. } if field == "equivalence"
    ));
}
