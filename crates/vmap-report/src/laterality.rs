//! Laterality term matching.
//!
//! Source values that split by body side ("Right eye", "left") need to be
//! reconciled against side-specific concepts; matching is whole-word and
//! case-insensitive.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn regex(self) -> &'static Regex {
        static LEFT: OnceLock<Regex> = OnceLock::new();
        static RIGHT: OnceLock<Regex> = OnceLock::new();
        match self {
            Self::Left => {
                LEFT.get_or_init(|| Regex::new(r"(?i)\bleft\b").expect("static side pattern"))
            }
            Self::Right => {
                RIGHT.get_or_init(|| Regex::new(r"(?i)\bright\b").expect("static side pattern"))
            }
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Whole-word, case-insensitive test for a side term.
pub fn mentions_side(value: &str, side: Side) -> bool {
    side.regex().is_match(value)
}

/// Per-value side flags over a set that must be pure: any value naming the
/// opposite side is an error, not a silent false.
pub fn laterality_flags(values: &[String], side: Side) -> Result<Vec<bool>> {
    for value in values {
        if mentions_side(value, side.opposite()) {
            return Err(ReportError::MixedLaterality {
                value: value.clone(),
                side,
            });
        }
    }
    Ok(values.iter().map(|v| mentions_side(v, side)).collect())
}

/// Per-value side flags with no purity requirement.
pub fn filter_laterality_terms(values: &[String], side: Side) -> Vec<bool> {
    values.iter().map(|v| mentions_side(v, side)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_whole_word() {
        assert!(mentions_side("Right eye", Side::Right));
        assert!(mentions_side("upper RIGHT quadrant", Side::Right));
        assert!(!mentions_side("copyright notice", Side::Right));
        assert!(!mentions_side("lefty", Side::Left));
    }

    #[test]
    fn flags_reject_mixed_sets() {
        let values = vec!["Right eye".to_string(), "Left eye".to_string()];
        assert!(matches!(
            laterality_flags(&values, Side::Right),
            Err(ReportError::MixedLaterality { .. })
        ));
        assert_eq!(
            filter_laterality_terms(&values, Side::Right),
            vec![true, false]
        );
    }

    #[test]
    fn pure_sets_flag_per_value() {
        let values = vec!["Right eye".to_string(), "Both".to_string()];
        assert_eq!(
            laterality_flags(&values, Side::Right).expect("pure set"),
            vec![true, false]
        );
    }
}
