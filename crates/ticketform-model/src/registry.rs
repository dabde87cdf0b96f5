//! Logical field name to element selector resolution.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::FormConfig;
use crate::error::ConfigurationError;
use crate::field::FieldKey;
use crate::variant::Variant;

/// Selectors for a field's input element and its wrapping group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSelectors {
    pub input: String,
    pub group: String,
}

impl FieldSelectors {
    fn for_key(key: FieldKey) -> Self {
        Self {
            input: format!("#id_{}", key.form_key()),
            group: format!("#id_group_{}", key.form_key()),
        }
    }
}

/// Registry of the fields rendered for one deployment.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    variant: Variant,
    selectors: BTreeMap<FieldKey, FieldSelectors>,
}

impl FieldRegistry {
    pub fn new(config: &FormConfig) -> Self {
        let selectors = config
            .fields()
            .map(|key| (key, FieldSelectors::for_key(key)))
            .collect();
        Self {
            variant: config.variant(),
            selectors,
        }
    }

    /// Resolve a logical field name.
    pub fn resolve(&self, logical_name: &str) -> Result<&FieldSelectors, ConfigurationError> {
        let key = logical_name.parse::<FieldKey>()?;
        self.resolve_key(key)
    }

    pub fn resolve_key(&self, key: FieldKey) -> Result<&FieldSelectors, ConfigurationError> {
        self.selectors
            .get(&key)
            .ok_or_else(|| ConfigurationError::FieldNotEnabled {
                field: key.logical_name().to_string(),
                variant: self.variant.to_string(),
            })
    }

    /// Resolve a logical name to its key, failing for fields this form lacks.
    pub fn key(&self, logical_name: &str) -> Result<FieldKey, ConfigurationError> {
        let key = logical_name.parse::<FieldKey>()?;
        self.resolve_key(key)?;
        Ok(key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.selectors.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldSelectors)> {
        self.selectors.iter().map(|(key, selectors)| (*key, selectors))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
