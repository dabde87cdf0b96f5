//! In-memory form document and its JSON snapshot format.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::trace;

use ticketform_model::{ConfigurationError, FieldKey, FieldRegistry, FieldValue, FormError};

use crate::document::{FormDocument, NumericBounds};

/// One field as stored in a form snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Options the list was first rendered with, kept once the engine has
    /// rewritten `options`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    pub visible: bool,
    pub required_marker: bool,
    pub suppressed: bool,
}

impl Default for FieldSnapshot {
    fn default() -> Self {
        Self {
            value: None,
            checked: None,
            options: None,
            source_options: None,
            min: None,
            max: None,
            visible: true,
            required_marker: false,
            suppressed: false,
        }
    }
}

/// A rendered form keyed by logical field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSnapshot {
    pub fields: BTreeMap<String, FieldSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldState {
    value: FieldValue,
    visible: bool,
    required_marker: bool,
    options: Option<Vec<String>>,
    source_options: Option<Vec<String>>,
    bounds: Option<NumericBounds>,
    suppressed: bool,
}

impl FieldState {
    fn new(value: FieldValue) -> Self {
        Self {
            value,
            visible: true,
            required_marker: false,
            options: None,
            source_options: None,
            bounds: None,
            suppressed: false,
        }
    }
}

/// Form document held in memory.
///
/// Counts every write it receives so callers can assert that a
/// reconciliation pass left the form untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    fields: BTreeMap<FieldKey, FieldState>,
    mutations: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a field with an initial value.
    #[must_use]
    pub fn with_field(mut self, field: FieldKey, value: FieldValue) -> Self {
        self.fields.insert(field, FieldState::new(value));
        self
    }

    /// Render a select with its options and selected value.
    #[must_use]
    pub fn with_select(mut self, field: FieldKey, options: &[&str], value: &str) -> Self {
        let mut state = FieldState::new(FieldValue::text(value));
        state.options = Some(options.iter().map(|option| (*option).to_string()).collect());
        self.fields.insert(field, state);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, field: FieldKey, bounds: NumericBounds) -> Self {
        if let Some(state) = self.fields.get_mut(&field) {
            state.bounds = Some(bounds);
        }
        self
    }

    /// Number of writes received so far.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn from_snapshot(
        snapshot: FormSnapshot,
        registry: &FieldRegistry,
    ) -> Result<Self, ConfigurationError> {
        let mut fields = BTreeMap::new();
        for (name, field) in snapshot.fields {
            let key = registry.key(&name)?;
            let value = match (key.is_checkbox(), field.checked, field.value) {
                (true, Some(checked), _) => FieldValue::Checked(checked),
                (true, None, Some(raw)) => key.parse_value(&raw)?,
                (true, None, None) => FieldValue::Checked(false),
                (false, _, value) => FieldValue::Text(value.unwrap_or_default()),
            };
            let bounds = (field.min.is_some() || field.max.is_some())
                .then(|| NumericBounds::new(field.min, field.max));
            fields.insert(
                key,
                FieldState {
                    value,
                    visible: field.visible,
                    required_marker: field.required_marker,
                    options: field.options,
                    source_options: field.source_options,
                    bounds,
                    suppressed: field.suppressed,
                },
            );
        }
        Ok(Self {
            fields,
            mutations: 0,
        })
    }

    pub fn to_snapshot(&self) -> FormSnapshot {
        let fields = self
            .fields
            .iter()
            .map(|(key, state)| {
                let (value, checked) = match &state.value {
                    FieldValue::Text(value) => (Some(value.clone()), None),
                    FieldValue::Checked(checked) => (None, Some(*checked)),
                };
                let snapshot = FieldSnapshot {
                    value,
                    checked,
                    options: state.options.clone(),
                    source_options: state.source_options.clone(),
                    min: state.bounds.and_then(|bounds| bounds.min),
                    max: state.bounds.and_then(|bounds| bounds.max),
                    visible: state.visible,
                    required_marker: state.required_marker,
                    suppressed: state.suppressed,
                };
                (key.logical_name().to_string(), snapshot)
            })
            .collect();
        FormSnapshot { fields }
    }

    /// Read a JSON form snapshot.
    pub fn load(path: &Path, registry: &FieldRegistry) -> Result<Self, FormError> {
        let contents = fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: FormSnapshot =
            serde_json::from_str(&contents).map_err(|source| FormError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_snapshot(snapshot, registry)?)
    }

    /// Write the current state as a JSON form snapshot.
    pub fn save(&self, path: &Path) -> Result<(), FormError> {
        let json = serde_json::to_string_pretty(&self.to_snapshot()).map_err(|source| {
            FormError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&mut self, field: FieldKey, apply: impl FnOnce(&mut FieldState)) {
        let Some(state) = self.fields.get_mut(&field) else {
            trace!(field = %field, "ignoring write to absent element");
            return;
        };
        apply(state);
        self.mutations += 1;
    }
}

impl FormDocument for MemoryDocument {
    fn fields(&self) -> Vec<FieldKey> {
        self.fields.keys().copied().collect()
    }

    fn value(&self, field: FieldKey) -> Option<FieldValue> {
        self.fields.get(&field).map(|state| state.value.clone())
    }

    fn set_value(&mut self, field: FieldKey, value: FieldValue) {
        self.write(field, |state| state.value = value);
    }

    fn is_group_visible(&self, field: FieldKey) -> Option<bool> {
        self.fields.get(&field).map(|state| state.visible)
    }

    fn set_group_visible(&mut self, field: FieldKey, visible: bool) {
        self.write(field, |state| state.visible = visible);
    }

    fn has_required_marker(&self, field: FieldKey) -> bool {
        self.fields
            .get(&field)
            .is_some_and(|state| state.required_marker)
    }

    fn set_required_marker(&mut self, field: FieldKey, present: bool) {
        self.write(field, |state| state.required_marker = present);
    }

    fn options(&self, field: FieldKey) -> Option<&[String]> {
        self.fields
            .get(&field)
            .and_then(|state| state.options.as_deref())
    }

    fn source_options(&self, field: FieldKey) -> Option<&[String]> {
        self.fields.get(&field).and_then(|state| {
            state
                .source_options
                .as_deref()
                .or(state.options.as_deref())
        })
    }

    fn set_options(&mut self, field: FieldKey, options: Vec<String>) {
        self.write(field, |state| {
            if state.source_options.is_none() {
                state.source_options = state.options.take();
            }
            let selected = state.value.as_str();
            if !options.iter().any(|option| option == selected) {
                state.value = FieldValue::Text(options.first().cloned().unwrap_or_default());
            }
            state.options = Some(options);
        });
    }

    fn bounds(&self, field: FieldKey) -> Option<NumericBounds> {
        self.fields.get(&field).and_then(|state| state.bounds)
    }

    fn set_bounds(&mut self, field: FieldKey, bounds: NumericBounds) {
        self.write(field, |state| state.bounds = Some(bounds));
    }

    fn is_suppressed(&self, field: FieldKey) -> bool {
        self.fields.get(&field).is_some_and(|state| state.suppressed)
    }

    fn set_suppressed(&mut self, field: FieldKey, suppressed: bool) {
        self.write(field, |state| state.suppressed = suppressed);
    }
}
