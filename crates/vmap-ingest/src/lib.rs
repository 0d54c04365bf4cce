//! Tabular ingestion for the vocab mapping workspace.
//!
//! Everything here is single-pass CSV reading into the typed model: the OMOP
//! CONCEPT export, element/value definition tables, candidate update files,
//! and curated mapping tables. Loaders fail fast on schema problems — a
//! missing required column aborts before any partial data is produced.

pub mod concepts;
pub mod csv_utils;
pub mod definitions;
pub mod error;
pub mod mapping;

pub use concepts::{load_concept_index, load_concepts};
pub use csv_utils::{find_column, get_field, get_optional, read_csv_rows};
pub use definitions::{
    ValidValue, ValueIndex, load_candidate_pairs, load_element_definitions, load_element_index,
    load_valid_values, load_value_index,
};
pub use error::{IngestError, Result};
pub use mapping::load_mapping_records;
