//! SSSOM export.
//!
//! Curated mapping tables become SSSOM rows: prefixed subject/object CURIEs,
//! skos predicates from the equivalence classification, labels resolved
//! through the element/value/concept indexes. UNMATCHED rows have no
//! predicate and are omitted from the export.

use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use vmap_ingest::ValueIndex;
use vmap_model::{ConceptIndex, ElementIndex, Equivalence, MappingRecord};

use crate::error::{ReportError, Result};
use crate::keys::{name_match, value_key};

/// Canonical SSSOM column order for this export.
pub const SSSOM_COLUMNS: [&str; 7] = [
    "subject_id",
    "subject_label",
    "predicate_id",
    "object_id",
    "object_label",
    "comment",
    "mapping_justification",
];

/// Every exported mapping is curator-asserted.
pub const HUMAN_CURATION: &str = "semapv:HumanCuration";

const ELEMENT_SUBJECT_PREFIX: &str = "epic.kaleidoscope.common.CUI:";
const VALUE_SUBJECT_PREFIX: &str = "epic.kaleidoscope.common.prepopvalues:";
const OBJECT_PREFIX: &str = "ohdsi.concept:";

/// skos predicate for an equivalence class; UNMATCHED maps to none.
pub fn predicate_id(equivalence: Equivalence) -> Option<&'static str> {
    match equivalence {
        Equivalence::Equal => Some("skos:exactMatch"),
        Equivalence::Wider => Some("skos:broadMatch"),
        Equivalence::Narrower => Some("skos:narrowMatch"),
        Equivalence::Unmatched => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SssomRow {
    pub subject_id: String,
    pub subject_label: String,
    pub predicate_id: String,
    pub object_id: String,
    pub object_label: String,
    pub comment: String,
    pub mapping_justification: String,
}

/// Transform an element-level mapping table.
pub fn element_rows(
    records: &[MappingRecord],
    elements: &ElementIndex,
    concepts: &ConceptIndex,
) -> Result<Vec<SssomRow>> {
    let mut rows = Vec::new();
    for record in records {
        let Some(predicate) = predicate_id(record.equivalence) else {
            continue;
        };
        let element = elements
            .get(&record.source_code)
            .ok_or_else(|| ReportError::UnknownElement {
                cui: record.source_code.clone(),
            })?;
        rows.push(build_row(
            record,
            predicate,
            format!("{ELEMENT_SUBJECT_PREFIX}{}", record.source_code),
            name_match(&element.exam_area, &element.data_element),
            concepts,
        )?);
    }
    info!(exported = rows.len(), skipped = records.len() - rows.len(), "element rows transformed");
    Ok(rows)
}

/// Transform a value-level mapping table. Source codes here are registry
/// ids into the valid-values export.
pub fn value_rows(
    records: &[MappingRecord],
    values: &ValueIndex,
    elements: &ElementIndex,
    concepts: &ConceptIndex,
) -> Result<Vec<SssomRow>> {
    let mut rows = Vec::new();
    for record in records {
        let Some(predicate) = predicate_id(record.equivalence) else {
            continue;
        };
        let id: u64 = record
            .source_code
            .parse()
            .map_err(|_| ReportError::InvalidValueId(record.source_code.clone()))?;
        let value = values
            .get(id)
            .ok_or(ReportError::UnknownValueId(id))?;
        let element = elements
            .get(&value.cui)
            .ok_or_else(|| ReportError::UnknownElement {
                cui: value.cui.clone(),
            })?;
        let element_key = name_match(&element.exam_area, &element.data_element);
        rows.push(build_row(
            record,
            predicate,
            format!("{VALUE_SUBJECT_PREFIX}{}", record.source_code),
            value_key(&element_key, &value.value),
            concepts,
        )?);
    }
    info!(exported = rows.len(), skipped = records.len() - rows.len(), "value rows transformed");
    Ok(rows)
}

fn build_row(
    record: &MappingRecord,
    predicate: &str,
    subject_id: String,
    subject_label: String,
    concepts: &ConceptIndex,
) -> Result<SssomRow> {
    let concept_id = record
        .concept_id
        .ok_or_else(|| ReportError::MissingConceptId {
            source_code: record.source_code.clone(),
        })?;
    Ok(SssomRow {
        subject_id,
        subject_label,
        predicate_id: predicate.to_string(),
        object_id: format!("{OBJECT_PREFIX}{concept_id}"),
        // The concept may postdate the loaded vocabulary snapshot; the
        // label is left empty rather than failing the export.
        object_label: concepts.name(concept_id).unwrap_or_default().to_string(),
        comment: record.comment.clone().unwrap_or_default(),
        mapping_justification: HUMAN_CURATION.to_string(),
    })
}

/// Write rows as tab-separated SSSOM.
pub fn write_sssom_tsv(path: &Path, rows: &[SssomRow]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| ReportError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    writer
        .write_record(SSSOM_COLUMNS)
        .map_err(|e| ReportError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    for row in rows {
        writer
            .write_record([
                row.subject_id.as_str(),
                row.subject_label.as_str(),
                row.predicate_id.as_str(),
                row.object_id.as_str(),
                row.object_label.as_str(),
                row.comment.as_str(),
                row.mapping_justification.as_str(),
            ])
            .map_err(|e| ReportError::Csv {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    }
    writer.flush().map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), rows = rows.len(), "wrote SSSOM export");
    Ok(())
}
