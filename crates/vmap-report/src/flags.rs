//! Reviewer flag mining.
//!
//! Curators tag rows by writing uppercase tokens (NOMATCH, LATERALITY, ...)
//! into the free-text comment. A flag is any run of five or more capital
//! letters; short tokens stay out so ordinary abbreviations in prose don't
//! register.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use vmap_model::MappingRecord;

/// Tokens that match the flag pattern but are vocabulary names, not flags.
pub const DEFAULT_EXCLUSIONS: [&str; 1] = ["LOINC"];

fn flag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z]{5,}\b").expect("static flag pattern"))
}

/// Extract the flag tokens of one comment, minus exclusions.
pub fn comment_flags(comment: &str, exclusions: &[&str]) -> Vec<String> {
    flag_regex()
        .find_iter(comment)
        .map(|m| m.as_str())
        .filter(|token| !exclusions.contains(token))
        .map(ToString::to_string)
        .collect()
}

/// Per-row flag sets plus the flag vocabulary in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagExpansion {
    pub flags: Vec<String>,
    pub rows: Vec<BTreeSet<String>>,
}

impl FlagExpansion {
    pub fn row_has(&self, row: usize, flag: &str) -> bool {
        self.rows.get(row).is_some_and(|set| set.contains(flag))
    }
}

/// Expand the comment flags of every record.
pub fn expand_flags(records: &[MappingRecord], exclusions: &[&str]) -> FlagExpansion {
    let mut flags: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut row_flags = BTreeSet::new();
        if let Some(comment) = &record.comment {
            for flag in comment_flags(comment, exclusions) {
                if !flags.contains(&flag) {
                    flags.push(flag.clone());
                }
                row_flags.insert(flag);
            }
        }
        rows.push(row_flags);
    }
    FlagExpansion { flags, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_excluded_tokens_are_ignored() {
        let flags = comment_flags(
            "NOMATCH in LOINC; see SNOMED CT and the VA note",
            &DEFAULT_EXCLUSIONS,
        );
        assert_eq!(flags, vec!["NOMATCH".to_string(), "SNOMED".to_string()]);
    }

    #[test]
    fn vocabulary_is_in_first_seen_order() {
        let record = |comment: &str| MappingRecord {
            source_code: "EPIC#X".to_string(),
            equivalence: vmap_model::Equivalence::Unmatched,
            concept_id: None,
            comment: Some(comment.to_string()),
        };
        let records = vec![record("SUBFIELD then NOMATCH"), record("NOMATCH again")];
        let expansion = expand_flags(&records, &DEFAULT_EXCLUSIONS);
        assert_eq!(expansion.flags, vec!["SUBFIELD", "NOMATCH"]);
        assert!(expansion.row_has(1, "NOMATCH"));
        assert!(!expansion.row_has(1, "SUBFIELD"));
    }
}
