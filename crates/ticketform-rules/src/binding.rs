//! Explicit registration of rules against form elements.

use std::collections::BTreeSet;

use serde::Serialize;

use ticketform_model::{FieldKey, FormConfig};

use crate::kind::RuleKind;

/// A rule attached to the element it validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleBinding {
    pub field: FieldKey,
    pub rule: RuleKind,
}

/// Rules registered for one form configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    bindings: Vec<RuleBinding>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rules for a configuration.
    ///
    /// Bindings to fields the configuration does not render are skipped.
    pub fn for_config(config: &FormConfig) -> Self {
        let mut set = Self::new();
        for pathway in [FieldKey::Pathway, FieldKey::BackupPathway, FieldKey::NewPathway] {
            set.register(config, pathway, RuleKind::PathwayEligibility);
        }
        set.register(config, FieldKey::Pathway, RuleKind::PrescriptiveNotice);
        set.register(config, FieldKey::BackupPathway, RuleKind::PrescriptiveNotice);
        set.register(config, FieldKey::Pathway, RuleKind::BackupPathwayNotice);
        set.register(config, FieldKey::NewPathway, RuleKind::AcpAttachmentNotice);
        if config.variant().warns_on_standard_target() {
            set.register(config, FieldKey::Pathway, RuleKind::StandardTargetNotice);
            set.register(config, FieldKey::NewPathway, RuleKind::StandardTargetNotice);
        }
        set.register(config, FieldKey::AcpOption, RuleKind::AcpOptionEligibility);
        set
    }

    fn register(&mut self, config: &FormConfig, field: FieldKey, rule: RuleKind) {
        if config.has_field(field) {
            self.add(field, rule);
        }
    }

    /// Add a binding; registering the same binding twice is a no-op.
    pub fn add(&mut self, field: FieldKey, rule: RuleKind) {
        let binding = RuleBinding { field, rule };
        if !self.bindings.contains(&binding) {
            self.bindings.push(binding);
        }
    }

    pub fn rules_for(&self, field: FieldKey) -> impl Iterator<Item = RuleKind> + '_ {
        self.bindings
            .iter()
            .filter(move |binding| binding.field == field)
            .map(|binding| binding.rule)
    }

    /// Elements with at least one rule.
    pub fn bound_fields(&self) -> BTreeSet<FieldKey> {
        self.bindings.iter().map(|binding| binding.field).collect()
    }

    /// Elements whose rules read `field`, excluding `field` itself.
    pub fn dependents_of(&self, field: FieldKey) -> BTreeSet<FieldKey> {
        self.bindings
            .iter()
            .filter(|binding| binding.field != field && binding.rule.dependencies().contains(&field))
            .map(|binding| binding.field)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
