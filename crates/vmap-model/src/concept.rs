#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// One record from the OMOP CONCEPT export.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Concept {
    pub concept_id: i64,
    pub concept_code: String,
    pub concept_name: String,
    pub vocabulary_id: String,
}

/// Concept lookup keyed by concept id.
///
/// Replaces ad-hoc joins against the vocabulary file: load once, resolve
/// names and codes in memory.
#[derive(Debug, Clone, Default)]
pub struct ConceptIndex {
    by_id: BTreeMap<i64, Concept>,
}

impl ConceptIndex {
    pub fn from_concepts(concepts: Vec<Concept>) -> Self {
        let mut by_id = BTreeMap::new();
        for concept in concepts {
            by_id.insert(concept.concept_id, concept);
        }
        Self { by_id }
    }

    pub fn get(&self, concept_id: i64) -> Option<&Concept> {
        self.by_id.get(&concept_id)
    }

    pub fn name(&self, concept_id: i64) -> Option<&str> {
        self.by_id.get(&concept_id).map(|c| c.concept_name.as_str())
    }

    pub fn code(&self, concept_id: i64) -> Option<&str> {
        self.by_id.get(&concept_id).map(|c| c.concept_code.as_str())
    }

    pub fn vocabulary(&self, concept_id: i64) -> Option<&str> {
        self.by_id.get(&concept_id).map(|c| c.vocabulary_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
