use std::collections::BTreeMap;

use crate::field::{FieldKey, FieldValue};

/// Current values of the fields present on a rendered form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: FieldKey, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldKey, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: FieldKey) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Whether the field is rendered on this form.
    pub fn is_present(&self, field: FieldKey) -> bool {
        self.values.contains_key(&field)
    }

    /// Text value, empty for absent fields and checkboxes.
    pub fn text(&self, field: FieldKey) -> &str {
        self.values.get(&field).map_or("", FieldValue::as_str)
    }

    /// Checkbox state, false for absent fields.
    pub fn is_checked(&self, field: FieldKey) -> bool {
        self.values.get(&field).is_some_and(FieldValue::is_checked)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}

impl FromIterator<(FieldKey, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
