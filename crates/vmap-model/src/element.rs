#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};

/// One source data element: an exam area / data element pair with its CUI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElementDefinition {
    pub exam_area: String,
    pub data_element: String,
    pub cui: String,
}

/// Element lookup keyed by CUI. CUIs must be unique across definitions.
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    by_cui: BTreeMap<String, ElementDefinition>,
}

impl ElementIndex {
    pub fn from_definitions(definitions: Vec<ElementDefinition>) -> Result<Self> {
        let mut by_cui = BTreeMap::new();
        for definition in definitions {
            let cui = definition.cui.clone();
            if by_cui.insert(cui.clone(), definition).is_some() {
                return Err(ModelError::DuplicateCui(cui));
            }
        }
        Ok(Self { by_cui })
    }

    pub fn get(&self, cui: &str) -> Option<&ElementDefinition> {
        self.by_cui.get(cui)
    }

    pub fn len(&self) -> usize {
        self.by_cui.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_cui.is_empty()
    }
}
