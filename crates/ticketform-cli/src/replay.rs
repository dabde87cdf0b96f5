//! Replaying recorded changes against a loaded form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use ticketform_engine::{FormDocument, FormSession};
use ticketform_model::{ConfigurationError, FieldKey, Variant};
use ticketform_rules::{RuleKind, Severity};

/// A `name=value` change given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: String,
    pub value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("missing field name in '{s}'"));
        }
        Ok(Self {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    pub field: FieldKey,
    pub value: String,
    pub visible: bool,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    pub field: FieldKey,
    pub rule: RuleKind,
    pub severity: Severity,
    pub message: &'static str,
}

/// State of the form after replaying every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub variant: Variant,
    pub changes: usize,
    pub mutations: usize,
    pub groups: Vec<GroupRow>,
    pub messages: Vec<MessageRow>,
    pub submitted: bool,
    pub blocked: bool,
}

/// Apply `assignments` in order, then optionally submit.
pub fn replay<D: FormDocument>(
    session: &mut FormSession<'_, D>,
    assignments: &[Assignment],
    submit: bool,
) -> Result<CheckResult, ConfigurationError> {
    let mut mutations = 0;
    for assignment in assignments {
        debug!(change = %assignment, "replaying change");
        let report = session.change_named(&assignment.field, &assignment.value)?;
        mutations += report.mutations;
    }
    let blocked = submit && session.submit().is_blocked();
    Ok(CheckResult {
        variant: session.config().variant(),
        changes: assignments.len(),
        mutations,
        groups: groups(session.document()),
        messages: messages(session),
        submitted: submit,
        blocked,
    })
}

fn groups<D: FormDocument>(doc: &D) -> Vec<GroupRow> {
    doc.fields()
        .into_iter()
        .map(|field| GroupRow {
            field,
            value: doc.value(field).unwrap_or_default().to_string(),
            visible: doc.is_group_visible(field).unwrap_or(false),
            required: doc.has_required_marker(field),
        })
        .collect()
}

fn messages<D: FormDocument>(session: &FormSession<'_, D>) -> Vec<MessageRow> {
    session
        .validator()
        .displayed()
        .flat_map(|verdict| {
            verdict.failures.iter().map(|outcome| MessageRow {
                field: verdict.field,
                rule: outcome.rule,
                severity: outcome.severity(),
                message: outcome.rule.message(),
            })
        })
        .collect()
}
