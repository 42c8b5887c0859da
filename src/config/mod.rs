//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Order endpoint used when the configuration does not name one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9009/api/order";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// One entry of the topping catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingConfig {
    /// Identifier sent to the order endpoint (e.g., "1")
    pub id: String,

    /// Label shown next to the checkbox (e.g., "Pepperoni")
    pub label: String,
}

/// Complete configuration for the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// URL the order is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Toppings offered, in display order
    #[serde(default)]
    pub toppings: Vec<ToppingConfig>,
}

impl FormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Check that the endpoint is an http(s) URL and topping ids are unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let mut seen = HashSet::new();
        for (index, topping) in self.toppings.iter().enumerate() {
            if topping.id.is_empty() {
                return Err(ConfigError::EmptyToppingId { index });
            }
            if !seen.insert(topping.id.as_str()) {
                return Err(ConfigError::DuplicateTopping {
                    id: topping.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// The pizza shop's stock configuration
    pub fn default_config() -> Self {
        let topping = |id: &str, label: &str| ToppingConfig {
            id: id.to_string(),
            label: label.to_string(),
        };

        Self {
            endpoint: default_endpoint(),
            toppings: vec![
                topping("1", "Pepperoni"),
                topping("2", "Green Peppers"),
                topping("3", "Pineapple"),
                topping("4", "Mushrooms"),
                topping("5", "Ham"),
            ],
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
