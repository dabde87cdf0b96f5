//! The seam between the rule engine and the rendered form.

use serde::{Deserialize, Serialize};

use ticketform_model::{FieldKey, FieldValue, FormValues};

/// Inclusive numeric bounds of a number input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl NumericBounds {
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }
}

/// A rendered form the engine reads and mutates.
///
/// Every method addressing a field that is not rendered must be a silent
/// no-op (setters) or report absence (getters).
pub trait FormDocument {
    /// Fields rendered on the page.
    fn fields(&self) -> Vec<FieldKey>;

    fn value(&self, field: FieldKey) -> Option<FieldValue>;

    fn set_value(&mut self, field: FieldKey, value: FieldValue);

    fn is_group_visible(&self, field: FieldKey) -> Option<bool>;

    fn set_group_visible(&mut self, field: FieldKey, visible: bool);

    fn has_required_marker(&self, field: FieldKey) -> bool;

    /// Insert or remove the marker next to the field's label.
    fn set_required_marker(&mut self, field: FieldKey, present: bool);

    fn options(&self, field: FieldKey) -> Option<&[String]>;

    /// Options the list was rendered with before the engine rewrote it.
    fn source_options(&self, field: FieldKey) -> Option<&[String]> {
        self.options(field)
    }

    /// Replace the offered options. When the selected value is no longer
    /// offered, the selection falls back to the first option.
    fn set_options(&mut self, field: FieldKey, options: Vec<String>);

    fn bounds(&self, field: FieldKey) -> Option<NumericBounds>;

    fn set_bounds(&mut self, field: FieldKey, bounds: NumericBounds);

    /// Whether the element carries the soft-suppress marker.
    fn is_suppressed(&self, field: FieldKey) -> bool;

    fn set_suppressed(&mut self, field: FieldKey, suppressed: bool);

    fn contains(&self, field: FieldKey) -> bool {
        self.value(field).is_some()
    }

    /// Current values of every rendered field.
    fn values(&self) -> FormValues {
        self.fields()
            .into_iter()
            .filter_map(|field| self.value(field).map(|value| (field, value)))
            .collect()
    }
}
