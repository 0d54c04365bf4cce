#![deny(unsafe_code)]

use crate::Equivalence;

/// One row of a curated mapping table (source element or value -> concept).
///
/// `concept_id` is absent for rows the curators could not match;
/// `comment` carries reviewer free text, including uppercase flag tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    pub source_code: String,
    pub equivalence: Equivalence,
    pub concept_id: Option<i64>,
    pub comment: Option<String>,
}
