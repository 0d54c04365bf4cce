//! Mapping analysis and SSSOM export.

pub mod analysis;
pub mod error;
pub mod flags;
pub mod keys;
pub mod laterality;
pub mod sssom;

pub use analysis::{
    MappingAnalysis, OTHER_ELEMENTS, analyze_mapping, analyze_mapping_folded, combine_analyses,
};
pub use error::{ReportError, Result};
pub use flags::{DEFAULT_EXCLUSIONS, FlagExpansion, comment_flags, expand_flags};
pub use keys::{
    DATA_ELEMENT_HEADERS, EXAM_AREA_HEADERS, NAME_MATCH_COLUMN, VALUE_KEY_COLUMN,
    append_name_match, append_value_key, name_match, value_key,
};
pub use laterality::{Side, filter_laterality_terms, laterality_flags, mentions_side};
pub use sssom::{
    HUMAN_CURATION, SSSOM_COLUMNS, SssomRow, element_rows, predicate_id, value_rows,
    write_sssom_tsv,
};
