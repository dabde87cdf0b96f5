//! Applies visibility plans to a document.

use tracing::debug;

use ticketform_model::{FieldKey, FieldValue, FormConfig};

use crate::document::FormDocument;
use crate::options::{ExtensionReasons, gate_standard_target};
use crate::visibility::{self, BoundsPlan, GroupPlan, GroupState, OptionPlan, VisibilityPlan};

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Writes issued to the document.
    pub mutations: usize,
    /// Groups the plan left hidden.
    pub hidden: Vec<FieldKey>,
}

/// Derives visibility plans and applies them, writing only what differs.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityController<'c> {
    config: &'c FormConfig,
}

impl<'c> VisibilityController<'c> {
    pub fn new(config: &'c FormConfig) -> Self {
        Self { config }
    }

    /// Run every transition.
    pub fn reconcile<D: FormDocument>(&self, doc: &mut D, reasons: &ExtensionReasons) -> Applied {
        let plan = visibility::derive(self.config, &doc.values(), reasons);
        self.settle(plan, doc, reasons)
    }

    /// Run the transitions controlled by `changed`.
    pub fn transition<D: FormDocument>(
        &self,
        doc: &mut D,
        reasons: &ExtensionReasons,
        changed: FieldKey,
    ) -> Applied {
        let plan = visibility::derive_for(self.config, &doc.values(), reasons, changed);
        self.settle(plan, doc, reasons)
    }

    /// Apply `plan`, then keep re-running the transitions controlled by any
    /// value the plan itself rewrote (a reset group or a withdrawn option)
    /// until no value moves.
    fn settle<D: FormDocument>(
        &self,
        mut plan: VisibilityPlan,
        doc: &mut D,
        reasons: &ExtensionReasons,
    ) -> Applied {
        let mut applied = Applied::default();
        for _ in 0..=FieldKey::all().len() {
            let before = doc.values();
            let pass = apply(&plan, doc);
            applied.mutations += pass.mutations;
            applied.hidden.extend(pass.hidden);
            let after = doc.values();
            let moved = after
                .iter()
                .filter(|(field, value)| before.get(*field) != Some(*value))
                .map(|(field, _)| field)
                .collect::<Vec<_>>();
            if moved.is_empty() {
                break;
            }
            debug!(fields = ?moved, "cascading value changes");
            plan = visibility::derive_for_fields(self.config, &after, reasons, &moved);
        }
        applied.hidden.sort();
        applied.hidden.dedup();
        applied
            .hidden
            .retain(|field| doc.is_group_visible(*field) == Some(false));
        applied
    }
}

/// Apply a plan. Applying the same plan twice issues no writes the second
/// time.
pub fn apply<D: FormDocument>(plan: &VisibilityPlan, doc: &mut D) -> Applied {
    let mut applied = Applied::default();
    for group in &plan.groups {
        applied.mutations += apply_group(group, doc);
        if group.state == GroupState::Hidden {
            applied.hidden.push(group.field);
        }
    }
    for option in &plan.options {
        applied.mutations += apply_options(option, doc);
    }
    for bounds in &plan.bounds {
        applied.mutations += apply_bounds(bounds, doc);
    }
    if applied.mutations > 0 {
        debug!(mutations = applied.mutations, "applied visibility plan");
    }
    applied
}

fn apply_group<D: FormDocument>(plan: &GroupPlan, doc: &mut D) -> usize {
    let Some(visible) = doc.is_group_visible(plan.field) else {
        return 0;
    };
    let mut writes = 0;
    if visible != plan.state.is_visible() {
        debug!(field = %plan.field, state = plan.state.label(), "toggling group");
        doc.set_group_visible(plan.field, plan.state.is_visible());
        writes += 1;
    }
    if doc.has_required_marker(plan.field) != plan.state.is_required() {
        doc.set_required_marker(plan.field, plan.state.is_required());
        writes += 1;
    }
    if plan.reset {
        let empty = plan.field.empty_value();
        if doc.value(plan.field).as_ref() != Some(&empty) {
            doc.set_value(plan.field, empty);
            writes += 1;
        }
    }
    writes
}

fn apply_options<D: FormDocument>(plan: &OptionPlan, doc: &mut D) -> usize {
    match plan {
        OptionPlan::StandardTarget { list, offered } => {
            let Some(updated) = doc
                .options(*list)
                .and_then(|current| gate_standard_target(current, *offered))
            else {
                return 0;
            };
            debug!(list = %list, offered, "gating standard target option");
            doc.set_options(*list, updated);
            1
        }
        OptionPlan::Rebuild { list, options } => {
            if doc.options(*list) == Some(options.as_slice()) || !doc.contains(*list) {
                return 0;
            }
            doc.set_options(*list, options.clone());
            1
        }
    }
}

fn apply_bounds<D: FormDocument>(plan: &BoundsPlan, doc: &mut D) -> usize {
    if !doc.contains(plan.field) {
        return 0;
    }
    let mut writes = 0;
    if doc.bounds(plan.field) != Some(plan.bounds) {
        doc.set_bounds(plan.field, plan.bounds);
        writes += 1;
    }
    let Some(max) = plan.bounds.max else {
        return writes;
    };
    let current = doc
        .value(plan.field)
        .and_then(|value| value.as_str().trim().parse::<f64>().ok());
    if current.is_some_and(|value| value > max as f64) {
        debug!(field = %plan.field, max, "clamping value to maximum");
        doc.set_value(plan.field, FieldValue::Text(max.to_string()));
        writes += 1;
    }
    writes
}
