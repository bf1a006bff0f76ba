use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::naming::{DeclaredNaming, NamingPolicy, TagNaming};

/// Settings of a [`Validator`](crate::Validator).
///
/// Deserializable so it can live in an application's configuration file:
///
/// ```
/// let config: fieldrule::ValidatorConfig = serde_json::from_str(r#"{"error_tag": "field"}"#).unwrap();
/// assert_eq!(config.error_tag, "field");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Declaration tag consulted for the visible name of a failing field.
    /// Empty selects declared field names only.
    pub error_tag: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            error_tag: "serde".to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn naming(&self) -> Arc<dyn NamingPolicy> {
        if self.error_tag.is_empty() {
            Arc::new(DeclaredNaming)
        } else {
            Arc::new(TagNaming::new(self.error_tag.clone()))
        }
    }
}
