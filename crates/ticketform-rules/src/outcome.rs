use serde::Serialize;

use ticketform_model::FieldKey;

use crate::kind::{RuleKind, Severity};

/// Result of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: RuleKind,
    pub ok: bool,
}

impl RuleOutcome {
    pub fn new(rule: RuleKind, ok: bool) -> Self {
        Self { rule, ok }
    }

    /// Message to display, present only on failure.
    pub fn message(&self) -> Option<&'static str> {
        (!self.ok).then(|| self.rule.message())
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    pub fn is_blocking(&self) -> bool {
        !self.ok && self.rule.severity() == Severity::Blocking
    }
}

/// Failures of every rule bound to one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub field: FieldKey,
    pub failures: Vec<RuleOutcome>,
}

impl FieldVerdict {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_blocking(&self) -> bool {
        self.failures.iter().any(RuleOutcome::is_blocking)
    }

    /// True when the element only fails advisory rules; such elements carry
    /// the soft-suppress marker.
    pub fn is_advisory_only(&self) -> bool {
        !self.failures.is_empty() && !self.is_blocking()
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.failures.iter().filter_map(RuleOutcome::message)
    }
}
