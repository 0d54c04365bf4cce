//! Loaders for element definitions, the valid-values export, and candidate
//! update files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use vmap_model::{ElementDefinition, ElementIndex, ValuePair};

use crate::csv_utils::require_column;
use crate::error::{IngestError, Result};

/// One valid entry from the value-definition export: the registry id with its
/// (CUI, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidValue {
    pub id: u64,
    pub cui: String,
    pub value: String,
}

/// Valid-value lookup keyed by registry id.
#[derive(Debug, Clone, Default)]
pub struct ValueIndex {
    by_id: BTreeMap<u64, ValidValue>,
}

impl ValueIndex {
    pub fn from_values(values: Vec<ValidValue>) -> Self {
        let mut by_id = BTreeMap::new();
        for value in values {
            by_id.insert(value.id, value);
        }
        Self { by_id }
    }

    pub fn get(&self, id: u64) -> Option<&ValidValue> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn open_reader(path: &Path) -> Result<(csv::Reader<std::fs::File>, csv::StringRecord)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, &e))?;
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .clone();
    Ok((reader, headers))
}

/// Load element definitions (examArea / dataElement / CUI).
pub fn load_element_definitions(path: &Path) -> Result<Vec<ElementDefinition>> {
    let (mut reader, headers) = open_reader(path)?;
    let idx_exam_area = require_column(&headers, "examArea", path)?;
    let idx_data_element = require_column(&headers, "dataElement", path)?;
    let idx_cui = require_column(&headers, "CUI", path)?;

    let mut definitions = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, &e))?;
        definitions.push(ElementDefinition {
            exam_area: record.get(idx_exam_area).unwrap_or("").trim().to_string(),
            data_element: record.get(idx_data_element).unwrap_or("").trim().to_string(),
            cui: record.get(idx_cui).unwrap_or("").trim().to_string(),
        });
    }
    Ok(definitions)
}

/// Load element definitions into a CUI-keyed index.
pub fn load_element_index(path: &Path) -> Result<ElementIndex> {
    Ok(ElementIndex::from_definitions(load_element_definitions(
        path,
    )?)?)
}

/// Load the value-definition export, keeping only records still flagged valid.
pub fn load_valid_values(path: &Path) -> Result<Vec<ValidValue>> {
    let (mut reader, headers) = open_reader(path)?;
    let idx_id = require_column(&headers, "ID", path)?;
    let idx_cui = require_column(&headers, "CUI", path)?;
    let idx_value = require_column(&headers, "value", path)?;
    let idx_valid = require_column(&headers, "valid", path)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, &e))?;
        let valid = record.get(idx_valid).unwrap_or("").trim();
        if !matches!(valid, "true" | "True" | "TRUE" | "1") {
            continue;
        }
        let raw_id = record.get(idx_id).unwrap_or("").trim();
        let id = raw_id.parse::<u64>().map_err(|_| IngestError::InvalidField {
            path: path.to_path_buf(),
            field: "ID".to_string(),
            value: raw_id.to_string(),
        })?;
        values.push(ValidValue {
            id,
            cui: record.get(idx_cui).unwrap_or("").trim().to_string(),
            value: record.get(idx_value).unwrap_or("").trim().to_string(),
        });
    }
    Ok(values)
}

/// Load the valid-values export into an id-keyed index.
pub fn load_value_index(path: &Path) -> Result<ValueIndex> {
    Ok(ValueIndex::from_values(load_valid_values(path)?))
}

/// Load the (CUI, value) pairs proposed by one candidate update file.
///
/// Both columns are required; a file without them is rejected before any
/// pair is taken from it.
pub fn load_candidate_pairs(path: &Path) -> Result<Vec<ValuePair>> {
    let (mut reader, headers) = open_reader(path)?;
    let idx_cui = require_column(&headers, "CUI", path)?;
    let idx_value = require_column(&headers, "value", path)?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, &e))?;
        pairs.push(ValuePair::new(
            record.get(idx_cui).unwrap_or("").trim(),
            record.get(idx_value).unwrap_or("").trim(),
        ));
    }
    Ok(pairs)
}
