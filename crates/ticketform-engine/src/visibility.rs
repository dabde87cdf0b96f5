//! Derivation of group visibility from field values.
//!
//! Everything here is a pure function of the configuration, the current
//! values and the captured extension reasons. Deriving twice from the same
//! inputs yields the same plan; applying it is the controller's job.

use serde::Serialize;

use ticketform_model::catalog::MULTIFAMILY_HOUSING;
use ticketform_model::{AffordableTypeDriver, FieldKey, FormConfig, FormValues, Pathway};

use crate::document::NumericBounds;
use crate::options::ExtensionReasons;

/// Delay-years bounds without the extended QAH delay.
pub const STANDARD_DELAY_BOUNDS: NumericBounds = NumericBounds::new(Some(1), Some(3));

/// Delay-years bounds with the extended QAH delay.
pub const EXTENDED_DELAY_BOUNDS: NumericBounds = NumericBounds::new(Some(0), None);

const PATHWAY_LISTS: [FieldKey; 3] = [
    FieldKey::Pathway,
    FieldKey::BackupPathway,
    FieldKey::NewPathway,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupState {
    Hidden,
    VisibleOptional,
    VisibleRequired,
}

impl GroupState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::VisibleRequired)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hidden => "Hidden",
            Self::VisibleOptional => "Visible",
            Self::VisibleRequired => "Required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupPlan {
    pub field: FieldKey,
    pub state: GroupState,
    /// Clear the field's value while hidden.
    pub reset: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OptionPlan {
    /// Offer or withdraw the Standard Target option.
    StandardTarget { list: FieldKey, offered: bool },
    /// Replace the list outright.
    Rebuild { list: FieldKey, options: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundsPlan {
    pub field: FieldKey,
    pub bounds: NumericBounds,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityPlan {
    pub groups: Vec<GroupPlan>,
    pub options: Vec<OptionPlan>,
    pub bounds: Vec<BoundsPlan>,
}

impl VisibilityPlan {
    pub fn group(&self, field: FieldKey) -> Option<&GroupPlan> {
        self.groups.iter().find(|plan| plan.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.options.is_empty() && self.bounds.is_empty()
    }
}

/// One show/hide rule of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    AffordableBoolean,
    AffordableType,
    BackupPathway,
    Attachment,
    ExtensionReason,
    ExtendedDelay,
    StandardTargetOption,
}

impl Transition {
    pub const fn all() -> &'static [Self] {
        &[
            Self::AffordableBoolean,
            Self::AffordableType,
            Self::BackupPathway,
            Self::Attachment,
            Self::ExtensionReason,
            Self::ExtendedDelay,
            Self::StandardTargetOption,
        ]
    }

    /// Fields whose change re-runs this transition.
    pub fn controllers(&self, config: &FormConfig) -> &'static [FieldKey] {
        match self {
            Self::AffordableBoolean | Self::StandardTargetOption => &[FieldKey::PropertyType],
            Self::AffordableType => match config.affordable_type_driver() {
                AffordableTypeDriver::AffordableBoolean => {
                    &[FieldKey::PropertyType, FieldKey::AffordableBoolean]
                }
                AffordableTypeDriver::ExtendedDelay => &[],
            },
            Self::BackupPathway => &[FieldKey::Pathway],
            Self::Attachment => &[FieldKey::Pathway, FieldKey::NewPathway],
            Self::ExtensionReason => &[FieldKey::ExtOrExempt],
            Self::ExtendedDelay => &[FieldKey::ExtendedDelayForQah],
        }
    }

    fn plan(
        &self,
        config: &FormConfig,
        values: &FormValues,
        reasons: &ExtensionReasons,
        plan: &mut VisibilityPlan,
    ) {
        let property_type = values.text(FieldKey::PropertyType);
        let mut group = |field: FieldKey, state: GroupState, reset: bool| {
            if values.is_present(field) {
                plan.groups.push(GroupPlan {
                    field,
                    state,
                    reset: reset && !state.is_visible(),
                });
            }
        };
        match self {
            Self::AffordableBoolean => {
                let state = if property_type == MULTIFAMILY_HOUSING {
                    GroupState::VisibleOptional
                } else {
                    GroupState::Hidden
                };
                group(FieldKey::AffordableBoolean, state, true);
            }
            Self::AffordableType => {
                if config.affordable_type_driver() != AffordableTypeDriver::AffordableBoolean {
                    return;
                }
                let state = if property_type == MULTIFAMILY_HOUSING
                    && values.is_checked(FieldKey::AffordableBoolean)
                {
                    GroupState::VisibleOptional
                } else {
                    GroupState::Hidden
                };
                group(FieldKey::TypeAffordableHousing, state, true);
            }
            Self::BackupPathway => {
                let state = if config.is_backup_trigger(values.text(FieldKey::Pathway)) {
                    GroupState::VisibleRequired
                } else {
                    GroupState::Hidden
                };
                group(FieldKey::BackupPathway, state, true);
            }
            Self::Attachment => {
                let required = config.is_backup_trigger(values.text(FieldKey::Pathway))
                    || Pathway::AlternativeCompliance.matches(values.text(FieldKey::NewPathway));
                let state = if required {
                    GroupState::VisibleRequired
                } else {
                    GroupState::VisibleOptional
                };
                group(FieldKey::Attachment, state, false);
            }
            Self::ExtensionReason => {
                let selection = values.text(FieldKey::ExtOrExempt);
                if selection.is_empty() {
                    group(FieldKey::ExtReason, GroupState::Hidden, true);
                } else {
                    group(FieldKey::ExtReason, GroupState::VisibleOptional, false);
                    if values.is_present(FieldKey::ExtReason) {
                        plan.options.push(OptionPlan::Rebuild {
                            list: FieldKey::ExtReason,
                            options: reasons.options_for(selection),
                        });
                    }
                }
            }
            Self::ExtendedDelay => {
                let extended = values.is_checked(FieldKey::ExtendedDelayForQah);
                let state = if extended {
                    GroupState::VisibleRequired
                } else {
                    GroupState::Hidden
                };
                for field in config.qah_groups() {
                    group(*field, state, false);
                }
                if values.is_present(FieldKey::DelayYears) {
                    plan.bounds.push(BoundsPlan {
                        field: FieldKey::DelayYears,
                        bounds: if extended {
                            EXTENDED_DELAY_BOUNDS
                        } else {
                            STANDARD_DELAY_BOUNDS
                        },
                    });
                }
            }
            Self::StandardTargetOption => {
                if !values.is_present(FieldKey::PropertyType) {
                    return;
                }
                let offered = config.is_high_performance(property_type);
                for list in PATHWAY_LISTS {
                    if values.is_present(list) {
                        plan.options.push(OptionPlan::StandardTarget { list, offered });
                    }
                }
            }
        }
    }
}

/// Plan every transition; used when the form loads.
pub fn derive(config: &FormConfig, values: &FormValues, reasons: &ExtensionReasons) -> VisibilityPlan {
    let mut plan = VisibilityPlan::default();
    for transition in Transition::all() {
        transition.plan(config, values, reasons, &mut plan);
    }
    plan
}

/// Plan the transitions controlled by `changed`.
pub fn derive_for(
    config: &FormConfig,
    values: &FormValues,
    reasons: &ExtensionReasons,
    changed: FieldKey,
) -> VisibilityPlan {
    derive_for_fields(config, values, reasons, &[changed])
}

/// Plan every transition controlled by at least one of `changed`, each
/// transition once.
pub fn derive_for_fields(
    config: &FormConfig,
    values: &FormValues,
    reasons: &ExtensionReasons,
    changed: &[FieldKey],
) -> VisibilityPlan {
    let mut plan = VisibilityPlan::default();
    for transition in Transition::all() {
        let controllers = transition.controllers(config);
        if changed.iter().any(|field| controllers.contains(field)) {
            transition.plan(config, values, reasons, &mut plan);
        }
    }
    plan
}
