//! OMOP CONCEPT vocabulary loading.
//!
//! The CONCEPT export is tab-delimited and large; only the four columns the
//! mapping work needs are kept, filtered to the requested vocabularies.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use vmap_model::{Concept, ConceptIndex};

use crate::csv_utils::require_column;
use crate::error::{IngestError, Result};

/// Load the subset of CONCEPT records belonging to `vocabularies`.
pub fn load_concepts(path: &Path, vocabularies: &[&str]) -> Result<Vec<Concept>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| IngestError::csv(path, &e))?;

    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .clone();
    let idx_code = require_column(&headers, "concept_code", path)?;
    let idx_name = require_column(&headers, "concept_name", path)?;
    let idx_vocabulary = require_column(&headers, "vocabulary_id", path)?;
    let idx_id = require_column(&headers, "concept_id", path)?;

    let mut concepts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, &e))?;
        let vocabulary_id = record.get(idx_vocabulary).unwrap_or("").trim();
        if !vocabularies.contains(&vocabulary_id) {
            continue;
        }
        let raw_id = record.get(idx_id).unwrap_or("").trim();
        let concept_id = raw_id
            .parse::<i64>()
            .map_err(|_| IngestError::InvalidField {
                path: path.to_path_buf(),
                field: "concept_id".to_string(),
                value: raw_id.to_string(),
            })?;
        concepts.push(Concept {
            concept_id,
            concept_code: record.get(idx_code).unwrap_or("").trim().to_string(),
            concept_name: record.get(idx_name).unwrap_or("").trim().to_string(),
            vocabulary_id: vocabulary_id.to_string(),
        });
    }
    info!(
        count = concepts.len(),
        vocabularies = ?vocabularies,
        "loaded concept records"
    );
    Ok(concepts)
}

/// Load the CONCEPT subset and index it by concept id.
pub fn load_concept_index(path: &Path, vocabularies: &[&str]) -> Result<ConceptIndex> {
    Ok(ConceptIndex::from_concepts(load_concepts(path, vocabularies)?))
}
