pub mod concept;
pub mod definition;
pub mod element;
pub mod equivalence;
pub mod error;
pub mod mapping;
pub mod table;

pub use concept::{Concept, ConceptIndex};
pub use definition::{DefinitionRecord, ValuePair};
pub use element::{ElementDefinition, ElementIndex};
pub use equivalence::Equivalence;
pub use error::{ModelError, Result};
pub use mapping::MappingRecord;
pub use table::DataTable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalence_round_trips_submission_values() {
        for equivalence in Equivalence::ALL {
            let parsed: Equivalence = equivalence.as_str().parse().expect("parse equivalence");
            assert_eq!(parsed, equivalence);
        }
        assert!(" WIDER ".parse::<Equivalence>().is_ok());
        assert!("wider".parse::<Equivalence>().is_err());
    }

    #[test]
    fn data_table_serializes_in_order() {
        let mut table = DataTable::new(vec!["CUI".to_string(), "value".to_string()]);
        table.push_row(vec!["C123".to_string(), "20/20".to_string()]);
        let json = serde_json::to_string(&table).expect("serialize table");
        let round: DataTable = serde_json::from_str(&json).expect("deserialize table");
        assert_eq!(round, table);
        assert_eq!(round.column_index("value"), Some(1));
        assert_eq!(round.column_index("missing"), None);
    }

    #[test]
    fn element_index_rejects_duplicate_cui() {
        let def = |cui: &str| ElementDefinition {
            exam_area: "Visual Acuity".to_string(),
            data_element: "Distance".to_string(),
            cui: cui.to_string(),
        };
        let index = ElementIndex::from_definitions(vec![def("EPIC#1"), def("EPIC#2")])
            .expect("unique CUIs");
        assert_eq!(index.len(), 2);
        assert!(ElementIndex::from_definitions(vec![def("EPIC#1"), def("EPIC#1")]).is_err());
    }
}
