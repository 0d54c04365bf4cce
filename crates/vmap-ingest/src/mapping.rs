//! Curated mapping table loading.

use std::path::Path;

use vmap_model::{Equivalence, MappingRecord};

use crate::csv_utils::require_column;
use crate::error::{IngestError, Result};

/// Load a curated mapping table (sourceCode / equivalence / conceptId /
/// comment). Equivalence values are parsed strictly; an unknown value aborts
/// the load.
pub fn load_mapping_records(path: &Path) -> Result<Vec<MappingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, &e))?;
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .clone();
    let idx_source = require_column(&headers, "sourceCode", path)?;
    let idx_equivalence = require_column(&headers, "equivalence", path)?;
    let idx_concept = require_column(&headers, "conceptId", path)?;
    let idx_comment = require_column(&headers, "comment", path)?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, &e))?;
        let raw_equivalence = record.get(idx_equivalence).unwrap_or("").trim();
        let equivalence: Equivalence =
            raw_equivalence
                .parse()
                .map_err(|_| IngestError::InvalidField {
                    path: path.to_path_buf(),
                    field: "equivalence".to_string(),
                    value: raw_equivalence.to_string(),
                })?;
        let comment = record
            .get(idx_comment)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string);
        records.push(MappingRecord {
            source_code: record.get(idx_source).unwrap_or("").trim().to_string(),
            equivalence,
            concept_id: parse_concept_id(record.get(idx_concept).unwrap_or(""), path)?,
            comment,
        });
    }
    Ok(records)
}

/// Concept ids arrive as integers, but tables exported through dataframe
/// tooling render nullable integer columns as floats ("4011566.0").
fn parse_concept_id(raw: &str, path: &Path) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(Some(id));
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
            return Ok(Some(float as i64));
        }
    }
    Err(IngestError::InvalidField {
        path: path.to_path_buf(),
        field: "conceptId".to_string(),
        value: trimmed.to_string(),
    })
}
