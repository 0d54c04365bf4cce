#![deny(unsafe_code)]

use std::path::PathBuf;

use vmap_model::Equivalence;

use crate::laterality::Side;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A row carries a flag reserved for one equivalence class but was
    /// classified differently — the curated table contradicts itself.
    #[error("row {source_code} carries flag {flag} but is not {expected}")]
    FlagEquivalence {
        flag: String,
        expected: Equivalence,
        source_code: String,
    },

    #[error("value {value:?} mentions the opposite side in a {side}-only set")]
    MixedLaterality { value: String, side: Side },

    #[error("none of the accepted headers found: {candidates}")]
    MissingKeyColumn { candidates: String },

    #[error("no element definition for CUI {cui}")]
    UnknownElement { cui: String },

    #[error("no valid value definition with id {0}")]
    UnknownValueId(u64),

    #[error("value mapping sourceCode {0:?} is not a registry id")]
    InvalidValueId(String),

    #[error("mapped row {source_code} has no concept id")]
    MissingConceptId { source_code: String },

    #[error("failed to write {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
