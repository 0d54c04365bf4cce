//! Join keys for reconciling source elements across extracts.
//!
//! Extracts of the same catalog disagree on header spelling, so the
//! table-level helpers accept any of the known spellings and fail with the
//! full candidate list when none is present.

use vmap_model::DataTable;

use crate::error::{ReportError, Result};

/// Accepted spellings of the exam-area header.
pub const EXAM_AREA_HEADERS: [&str; 3] = ["examArea", "Exam Area", "ADD_INFO:Exam Area"];

/// Accepted spellings of the data-element header.
pub const DATA_ELEMENT_HEADERS: [&str; 3] = ["dataElement", "Data Element", "ADD_INFO:Data Element"];

/// Conventional name of the combined element key column.
pub const NAME_MATCH_COLUMN: &str = "NAMEMATCH";

/// Conventional name of the combined value key column.
pub const VALUE_KEY_COLUMN: &str = "VALSTRKEY";

/// The element join key: exam area and data element, "-"-joined.
pub fn name_match(exam_area: &str, data_element: &str) -> String {
    format!("{exam_area}-{data_element}")
}

/// The value join key: element key and value, "-"-joined.
pub fn value_key(name_match: &str, value: &str) -> String {
    format!("{name_match}-{value}")
}

fn find_any(table: &DataTable, candidates: &[&str]) -> Result<usize> {
    candidates
        .iter()
        .find_map(|name| table.column_index(name))
        .ok_or_else(|| ReportError::MissingKeyColumn {
            candidates: candidates.join(", "),
        })
}

fn cell<'t>(row: &'t [String], idx: usize) -> &'t str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Copy of `table` with a combined element-key column appended.
pub fn append_name_match(table: &DataTable, column_name: &str) -> Result<DataTable> {
    let idx_exam_area = find_any(table, &EXAM_AREA_HEADERS)?;
    let idx_data_element = find_any(table, &DATA_ELEMENT_HEADERS)?;

    let mut combined = table.clone();
    combined.columns.push(column_name.to_string());
    for row in &mut combined.rows {
        let key = name_match(cell(row, idx_exam_area), cell(row, idx_data_element));
        row.push(key);
    }
    Ok(combined)
}

/// Copy of `table` with a combined value-key column appended; expects the
/// element key column to already exist.
pub fn append_value_key(table: &DataTable, column_name: &str) -> Result<DataTable> {
    let idx_name_match = find_any(table, &[NAME_MATCH_COLUMN])?;
    let idx_value = find_any(table, &["value"])?;

    let mut combined = table.clone();
    combined.columns.push(column_name.to_string());
    for row in &mut combined.rows {
        let key = value_key(cell(row, idx_name_match), cell(row, idx_value));
        row.push(key);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        let mut table = DataTable::new(headers.iter().map(ToString::to_string).collect());
        for row in rows {
            table.push_row(row.iter().map(ToString::to_string).collect());
        }
        table
    }

    #[test]
    fn name_match_accepts_any_known_spelling() {
        let exported = table(
            &["ADD_INFO:Exam Area", "Data Element", "value"],
            &[&["Pupils", "Shape", "Round"]],
        );
        let combined = append_name_match(&exported, NAME_MATCH_COLUMN).expect("combine");
        assert_eq!(combined.columns.last().map(String::as_str), Some("NAMEMATCH"));
        assert_eq!(combined.rows[0].last().map(String::as_str), Some("Pupils-Shape"));
    }

    #[test]
    fn value_key_builds_on_name_match() {
        let base = table(
            &["examArea", "dataElement", "value"],
            &[&["Pupils", "Shape", "Round"]],
        );
        let with_name = append_name_match(&base, NAME_MATCH_COLUMN).expect("name key");
        let with_value = append_value_key(&with_name, VALUE_KEY_COLUMN).expect("value key");
        assert_eq!(
            with_value.rows[0].last().map(String::as_str),
            Some("Pupils-Shape-Round")
        );
    }

    #[test]
    fn missing_headers_list_all_candidates() {
        let bare = table(&["area", "element"], &[]);
        let error = append_name_match(&bare, NAME_MATCH_COLUMN).expect_err("no headers");
        assert!(error.to_string().contains("ADD_INFO:Exam Area"));
    }
}
