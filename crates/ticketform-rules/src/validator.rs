//! Per-element validation with displayed message tracking.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use ticketform_model::{FieldKey, FormConfig, FormValues};

use crate::binding::RuleSet;
use crate::outcome::FieldVerdict;

/// Evaluates bound rules and remembers which messages are on display.
///
/// A failing element keeps one verdict; re-checking replaces it, so a
/// message is never rendered twice.
#[derive(Debug, Clone)]
pub struct Validator<'c> {
    config: &'c FormConfig,
    rules: RuleSet,
    displayed: BTreeMap<FieldKey, FieldVerdict>,
}

impl<'c> Validator<'c> {
    pub fn new(config: &'c FormConfig) -> Self {
        Self::with_rules(config, RuleSet::for_config(config))
    }

    pub fn with_rules(config: &'c FormConfig, rules: RuleSet) -> Self {
        Self {
            config,
            rules,
            displayed: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &'c FormConfig {
        self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Re-check one element.
    ///
    /// Returns `None` when the element is not on the form.
    pub fn element(&mut self, field: FieldKey, values: &FormValues) -> Option<FieldVerdict> {
        let Some(value) = values.get(field) else {
            debug!(field = %field, "skipping validation of absent element");
            return None;
        };
        let failures = self
            .rules
            .rules_for(field)
            .map(|rule| rule.evaluate(value.as_str(), values, self.config))
            .filter(|outcome| !outcome.ok)
            .collect::<Vec<_>>();
        let verdict = FieldVerdict { field, failures };
        trace!(
            field = %field,
            failures = verdict.failures.len(),
            blocking = verdict.is_blocking(),
            "element checked"
        );
        if verdict.is_valid() {
            self.displayed.remove(&field);
        } else {
            self.displayed.insert(field, verdict.clone());
        }
        Some(verdict)
    }

    /// Check every bound element present on the form.
    pub fn form(&mut self, values: &FormValues) -> Vec<FieldVerdict> {
        self.rules
            .bound_fields()
            .into_iter()
            .filter_map(|field| self.element(field, values))
            .collect()
    }

    /// Drop a displayed message without re-checking.
    pub fn clear(&mut self, field: FieldKey) -> bool {
        self.displayed.remove(&field).is_some()
    }

    pub fn displayed(&self) -> impl Iterator<Item = &FieldVerdict> {
        self.displayed.values()
    }

    pub fn displayed_for(&self, field: FieldKey) -> Option<&FieldVerdict> {
        self.displayed.get(&field)
    }
}
