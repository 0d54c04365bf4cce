//! Equivalence and flag breakdown of a curated mapping table.

use std::collections::BTreeMap;

use tracing::debug;

use vmap_model::{ElementIndex, Equivalence, MappingRecord};

use crate::error::{ReportError, Result};
use crate::flags::{FlagExpansion, expand_flags};

/// Flags reserved for UNMATCHED rows.
const UNMATCHED_FLAGS: [&str; 4] = ["VALSMAPPED", "NOMATCH", "INDIRECT", "SUBFIELD"];

/// Flags reserved for WIDER rows.
const WIDER_FLAGS: [&str; 2] = ["LATERALITY", "CONCEPTMISSING"];

/// Data elements whose NOMATCH rows fold into OTHER in the folded profile:
/// free-text fields no vocabulary will ever cover.
pub const OTHER_ELEMENTS: [&str; 2] = ["Comments", "Users"];

/// Counts keyed the way downstream reporting expects them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MappingAnalysis {
    pub equivalence: BTreeMap<String, usize>,
    pub unmapped: BTreeMap<String, usize>,
    pub wider: BTreeMap<String, usize>,
}

/// Detailed breakdown: one bucket per reviewer flag.
pub fn analyze_mapping(records: &[MappingRecord], exclusions: &[&str]) -> Result<MappingAnalysis> {
    let expansion = expand_flags(records, exclusions);
    check_flag_consistency(records, &expansion)?;

    let mut unmapped = BTreeMap::new();
    for flag in UNMATCHED_FLAGS {
        let count = flagged_rows(&expansion, flag).count();
        // NOMATCH and SUBFIELD are always reported; the rarer flags only
        // when they occur at all.
        if count > 0 || flag == "NOMATCH" || flag == "SUBFIELD" {
            unmapped.insert(flag.to_string(), count);
        }
    }

    Ok(MappingAnalysis {
        equivalence: equivalence_counts(records),
        unmapped,
        wider: wider_counts(&expansion),
    })
}

/// Folded breakdown: VALSMAPPED/INDIRECT/SUBFIELD rows, plus NOMATCH rows
/// whose source element is a free-text field, collapse into OTHER.
pub fn analyze_mapping_folded(
    records: &[MappingRecord],
    exclusions: &[&str],
    elements: &ElementIndex,
) -> Result<MappingAnalysis> {
    let expansion = expand_flags(records, exclusions);
    check_flag_consistency(records, &expansion)?;

    let mut other = 0usize;
    for flag in ["VALSMAPPED", "INDIRECT", "SUBFIELD"] {
        other += flagged_rows(&expansion, flag).count();
    }
    let is_other_element = |record: &MappingRecord| {
        elements
            .get(&record.source_code)
            .is_some_and(|e| OTHER_ELEMENTS.contains(&e.data_element.as_str()))
    };
    let mut no_match = 0usize;
    for row in flagged_rows(&expansion, "NOMATCH") {
        if is_other_element(&records[row]) {
            other += 1;
        } else {
            no_match += 1;
        }
    }
    debug!(other, no_match, "folded unmatched counts");

    let mut unmapped = BTreeMap::new();
    unmapped.insert("OTHER".to_string(), other);
    unmapped.insert("NOMATCH".to_string(), no_match);

    Ok(MappingAnalysis {
        equivalence: equivalence_counts(records),
        unmapped,
        wider: wider_counts(&expansion),
    })
}

/// Key-wise sum of two analyses (element run + value run).
pub fn combine_analyses(left: &MappingAnalysis, right: &MappingAnalysis) -> MappingAnalysis {
    MappingAnalysis {
        equivalence: combine_counts(&left.equivalence, &right.equivalence),
        unmapped: combine_counts(&left.unmapped, &right.unmapped),
        wider: combine_counts(&left.wider, &right.wider),
    }
}

fn combine_counts(
    left: &BTreeMap<String, usize>,
    right: &BTreeMap<String, usize>,
) -> BTreeMap<String, usize> {
    let mut combined = left.clone();
    for (key, count) in right {
        *combined.entry(key.clone()).or_insert(0) += count;
    }
    combined
}

fn equivalence_counts(records: &[MappingRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for equivalence in Equivalence::ALL {
        counts.insert(equivalence.as_str().to_string(), 0);
    }
    for record in records {
        *counts
            .entry(record.equivalence.as_str().to_string())
            .or_insert(0) += 1;
    }
    counts
}

fn wider_counts(expansion: &FlagExpansion) -> BTreeMap<String, usize> {
    let laterality_only = expansion
        .rows
        .iter()
        .filter(|row| row.contains("LATERALITY") && !row.contains("CONCEPTMISSING"))
        .count();
    let concept_missing_only = expansion
        .rows
        .iter()
        .filter(|row| row.contains("CONCEPTMISSING") && !row.contains("LATERALITY"))
        .count();
    let both = expansion
        .rows
        .iter()
        .filter(|row| row.contains("CONCEPTMISSING") && row.contains("LATERALITY"))
        .count();

    let mut wider = BTreeMap::new();
    wider.insert("LATERALITY".to_string(), laterality_only);
    wider.insert("CONCEPTMISSING".to_string(), concept_missing_only);
    wider.insert("CONCEPTMISSING&LATERALITY".to_string(), both);
    wider
}

fn flagged_rows<'e>(
    expansion: &'e FlagExpansion,
    flag: &'e str,
) -> impl Iterator<Item = usize> + 'e {
    expansion
        .rows
        .iter()
        .enumerate()
        .filter(move |(_, row)| row.contains(flag))
        .map(|(idx, _)| idx)
}

fn check_flag_consistency(records: &[MappingRecord], expansion: &FlagExpansion) -> Result<()> {
    let expectations = UNMATCHED_FLAGS
        .iter()
        .map(|flag| (*flag, Equivalence::Unmatched))
        .chain(WIDER_FLAGS.iter().map(|flag| (*flag, Equivalence::Wider)));
    for (flag, expected) in expectations {
        for row in flagged_rows(expansion, flag) {
            let record = &records[row];
            if record.equivalence != expected {
                return Err(ReportError::FlagEquivalence {
                    flag: flag.to_string(),
                    expected,
                    source_code: record.source_code.clone(),
                });
            }
        }
    }
    Ok(())
}
