//! Topping catalog offered by the form

use crate::config::ToppingConfig;
use indexmap::IndexMap;

/// Toppings the form offers, keyed by id, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToppingCatalog {
    toppings: IndexMap<String, String>,
}

impl ToppingCatalog {
    /// Build the catalog; a repeated id keeps its first position and last label
    pub fn new(toppings: &[ToppingConfig]) -> Self {
        Self {
            toppings: toppings
                .iter()
                .map(|t| (t.id.clone(), t.label.clone()))
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.toppings.contains_key(id)
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.toppings.get(id).map(String::as_str)
    }

    /// `(id, label)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.toppings
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.toppings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toppings.is_empty()
    }
}

impl From<&[ToppingConfig]> for ToppingCatalog {
    fn from(toppings: &[ToppingConfig]) -> Self {
        Self::new(toppings)
    }
}
