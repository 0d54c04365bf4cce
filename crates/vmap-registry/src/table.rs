//! Persisted definition table serialization.
//!
//! Header: `ID,CUI,value,valid,creation_date,invalid_date`. Booleans are
//! parsed leniently (other tooling writes `True`/`False`) and written
//! canonically as `true`/`false`; a null invalid_date is an empty cell.

use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};

use vmap_model::DefinitionRecord;

use crate::error::{RegistryError, Result};

pub(crate) const HEADER: [&str; 6] = [
    "ID",
    "CUI",
    "value",
    "valid",
    "creation_date",
    "invalid_date",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

fn csv_error(path: &Path, error: &csv::Error) -> RegistryError {
    RegistryError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn field_error(path: &Path, field: &str, value: &str) -> RegistryError {
    RegistryError::Field {
        path: path.to_path_buf(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(raw: &str, path: &Path, field: &str) -> Result<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(field_error(path, field, other)),
    }
}

fn parse_date(raw: &str, path: &Path, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| field_error(path, field, raw.trim()))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Load the persisted table, verifying that every record's ID equals its
/// position. A renumbered or reordered table is corruption, not data.
pub fn load_definitions(path: &Path) -> Result<Vec<DefinitionRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, &e))?
        .clone();

    let mut columns = [0usize; 6];
    for (slot, name) in columns.iter_mut().zip(HEADER) {
        *slot = headers
            .iter()
            .position(|h| h.trim_matches('\u{feff}').trim() == name)
            .ok_or_else(|| RegistryError::Csv {
                path: path.to_path_buf(),
                message: format!("missing required column {name:?}"),
            })?;
    }
    let [idx_id, idx_cui, idx_value, idx_valid, idx_created, idx_invalidated] = columns;

    let mut records = Vec::new();
    for (position, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        let get = |idx: usize| record.get(idx).unwrap_or("").trim();

        let id: u64 = get(idx_id)
            .parse()
            .map_err(|_| field_error(path, "ID", get(idx_id)))?;
        if id != position as u64 {
            return Err(RegistryError::integrity(format!(
                "record at position {position} carries id {id}; ids must equal their position"
            )));
        }
        let invalid_date = match get(idx_invalidated) {
            "" => None,
            raw => Some(parse_date(raw, path, "invalid_date")?),
        };
        records.push(DefinitionRecord {
            id,
            cui: get(idx_cui).to_string(),
            value: get(idx_value).to_string(),
            valid: parse_bool(get(idx_valid), path, "valid")?,
            creation_date: parse_date(get(idx_created), path, "creation_date")?,
            invalid_date,
        });
    }
    Ok(records)
}

/// Write the full table in canonical form.
pub(crate) fn write_definitions(path: &Path, records: &[DefinitionRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    writer
        .write_record(HEADER)
        .map_err(|e| csv_error(path, &e))?;
    for record in records {
        writer
            .write_record([
                record.id.to_string(),
                record.cui.clone(),
                record.value.clone(),
                if record.valid { "true" } else { "false" }.to_string(),
                format_date(record.creation_date),
                record.invalid_date.map(format_date).unwrap_or_default(),
            ])
            .map_err(|e| csv_error(path, &e))?;
    }
    writer.flush().map_err(|e| RegistryError::io(path, e))?;
    Ok(())
}
