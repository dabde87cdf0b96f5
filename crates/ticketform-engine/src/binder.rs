//! Connects the rule validator to a document.

use std::collections::BTreeSet;

use ticketform_model::{FieldKey, FormConfig};
use ticketform_rules::{FieldVerdict, RuleSet, Validator};

use crate::document::FormDocument;

/// Re-runs validation for a changed field and everything that depends on
/// it, then marks advisory-only failures with the soft-suppress marker.
#[derive(Debug, Clone)]
pub struct ValidationBinder<'c> {
    validator: Validator<'c>,
}

impl<'c> ValidationBinder<'c> {
    pub fn new(config: &'c FormConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        self.validator.rules()
    }

    pub fn validator(&self) -> &Validator<'c> {
        &self.validator
    }

    /// Fields re-checked when `changed` changes: itself and its dependents.
    pub fn targets(&self, changed: FieldKey) -> BTreeSet<FieldKey> {
        let mut targets = self.validator.rules().dependents_of(changed);
        targets.insert(changed);
        targets
    }

    pub fn revalidate<D: FormDocument>(&mut self, changed: FieldKey, doc: &mut D) -> Vec<FieldVerdict> {
        let values = doc.values();
        let mut verdicts = Vec::new();
        for field in self.targets(changed) {
            if let Some(verdict) = self.validator.element(field, &values) {
                mark(&verdict, doc);
                verdicts.push(verdict);
            }
        }
        verdicts
    }

    /// Check every bound element, as on submit.
    pub fn check_form<D: FormDocument>(&mut self, doc: &mut D) -> Vec<FieldVerdict> {
        let verdicts = self.validator.form(&doc.values());
        for verdict in &verdicts {
            mark(verdict, doc);
        }
        verdicts
    }

    /// Remove a field's displayed message, e.g. once its group is hidden.
    pub fn clear(&mut self, field: FieldKey) -> bool {
        self.validator.clear(field)
    }
}

fn mark<D: FormDocument>(verdict: &FieldVerdict, doc: &mut D) {
    let suppress = verdict.is_advisory_only();
    if doc.is_suppressed(verdict.field) != suppress {
        doc.set_suppressed(verdict.field, suppress);
    }
}
