//! Closed set of form rules.
//!
//! Each rule is a pure predicate over the value of the element it is bound
//! to and the current values of the fields it depends on. Rules never touch
//! the document; marking elements is left to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use ticketform_model::{FieldKey, FormConfig, FormValues, Pathway};

use crate::messages;
use crate::outcome::RuleOutcome;

/// Whether a failing rule blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The message is shown but the element is treated as valid.
    Advisory,
    /// The form cannot be submitted until the rule passes.
    Blocking,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Advisory => "Advisory",
            Self::Blocking => "Blocking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Standard Target Pathway requires a high-performance property type.
    PathwayEligibility,
    /// Prescriptive Pathway needs an energy audit before approval.
    PrescriptiveNotice,
    /// ACP on the selection form needs a backup pathway and a proposal.
    /// Silent on the change form, which renders a new-pathway field.
    BackupPathwayNotice,
    /// ACP on the change form needs a proposal attachment.
    AcpAttachmentNotice,
    /// Standard Target Pathway needs a backup pathway.
    StandardTargetNotice,
    /// The affordable housing ACP sub-option needs an affordable property.
    AcpOptionEligibility,
}

impl RuleKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::PathwayEligibility,
            Self::PrescriptiveNotice,
            Self::BackupPathwayNotice,
            Self::AcpAttachmentNotice,
            Self::StandardTargetNotice,
            Self::AcpOptionEligibility,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PathwayEligibility => "pathway_eligibility",
            Self::PrescriptiveNotice => "prescriptive_notice",
            Self::BackupPathwayNotice => "backup_pathway_notice",
            Self::AcpAttachmentNotice => "acp_attachment_notice",
            Self::StandardTargetNotice => "standard_target_notice",
            Self::AcpOptionEligibility => "acp_option_eligibility",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::PathwayEligibility => messages::INELIGIBLE_STANDARD_TARGET,
            Self::PrescriptiveNotice => messages::PRESCRIPTIVE_SELECTED,
            Self::BackupPathwayNotice => messages::ACP_REQUIRES_BACKUP,
            Self::AcpAttachmentNotice => messages::ACP_REQUIRES_ATTACHMENT,
            Self::StandardTargetNotice => messages::STANDARD_TARGET_SELECTED,
            Self::AcpOptionEligibility => messages::INELIGIBLE_AFFORDABLE_HOUSING_ACP,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::PathwayEligibility | Self::AcpOptionEligibility => Severity::Blocking,
            Self::PrescriptiveNotice
            | Self::BackupPathwayNotice
            | Self::AcpAttachmentNotice
            | Self::StandardTargetNotice => Severity::Advisory,
        }
    }

    /// Fields, other than the bound element, the predicate reads.
    pub fn dependencies(&self) -> &'static [FieldKey] {
        match self {
            Self::PathwayEligibility => &[FieldKey::PropertyType],
            Self::AcpOptionEligibility => &[FieldKey::AffordableBoolean, FieldKey::PropertyType],
            Self::PrescriptiveNotice
            | Self::BackupPathwayNotice
            | Self::AcpAttachmentNotice
            | Self::StandardTargetNotice => &[],
        }
    }

    /// Evaluate the rule for an element whose current value is `value`.
    ///
    /// An empty element value always passes.
    pub fn evaluate(&self, value: &str, values: &FormValues, config: &FormConfig) -> RuleOutcome {
        let ok = value.is_empty() || self.passes(value, values, config);
        RuleOutcome::new(*self, ok)
    }

    fn passes(&self, value: &str, values: &FormValues, config: &FormConfig) -> bool {
        match self {
            Self::PathwayEligibility => {
                let property_type = values.text(FieldKey::PropertyType);
                !(Pathway::StandardTarget.matches(value)
                    && !property_type.is_empty()
                    && !config.is_high_performance(property_type))
            }
            Self::PrescriptiveNotice => !Pathway::Prescriptive.matches(value),
            // The change form carries its own attachment notice.
            Self::BackupPathwayNotice => {
                values.is_present(FieldKey::NewPathway)
                    || !Pathway::AlternativeCompliance.matches(value)
            }
            Self::AcpAttachmentNotice => !Pathway::AlternativeCompliance.matches(value),
            Self::StandardTargetNotice => !Pathway::StandardTarget.matches(value),
            Self::AcpOptionEligibility => {
                let property_type = values.text(FieldKey::PropertyType);
                !(value == config.affordable_housing_acp_option()
                    && !values.is_checked(FieldKey::AffordableBoolean)
                    && config.acp_property_check().holds(property_type))
            }
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use ticketform_model::catalog::AFFORDABLE_HOUSING_ACP_OPTION;
    use ticketform_model::{AcpPropertyCheck, ConfigFile, FieldValue, Variant};

    use super::*;

    fn values(property_type: &str) -> FormValues {
        FormValues::new().with(FieldKey::PropertyType, FieldValue::text(property_type))
    }

    #[test]
    fn pathway_eligibility_checks_allow_list() {
        let config = FormConfig::for_variant(Variant::Dc);
        let rule = RuleKind::PathwayEligibility;
        assert!(rule.evaluate("Standard Target Pathway", &values("Restaurant"), &config).ok);
        assert!(!rule.evaluate("Standard Target Pathway", &values("Custom Type"), &config).ok);
        assert!(rule.evaluate("Performance Pathway", &values("Custom Type"), &config).ok);
    }

    #[test]
    fn pathway_eligibility_passes_without_property_type() {
        let config = FormConfig::for_variant(Variant::Dc);
        let outcome =
            RuleKind::PathwayEligibility.evaluate("Standard Target Pathway", &values(""), &config);
        assert!(outcome.ok);
    }

    #[test]
    fn notices_fail_on_their_sentinel() {
        let config = FormConfig::for_variant(Variant::Dc);
        let empty = FormValues::new();
        let prescriptive = RuleKind::PrescriptiveNotice.evaluate("Prescriptive Pathway", &empty, &config);
        assert!(!prescriptive.ok);
        assert!(!prescriptive.is_blocking());
        assert_eq!(prescriptive.message(), Some(messages::PRESCRIPTIVE_SELECTED));

        assert!(!RuleKind::BackupPathwayNotice
            .evaluate("Alternative Compliance Pathway", &empty, &config)
            .ok);
        assert!(RuleKind::AcpAttachmentNotice
            .evaluate("Performance Pathway", &empty, &config)
            .ok);
    }

    #[test]
    fn empty_value_always_passes() {
        let config = FormConfig::for_variant(Variant::DcStaging);
        for rule in RuleKind::all() {
            assert!(rule.evaluate("", &FormValues::new(), &config).ok, "{rule}");
        }
    }

    #[test]
    fn acp_option_eligibility_literal_ignores_property_type() {
        let config = FormConfig::for_variant(Variant::DcStaging);
        let rule = RuleKind::AcpOptionEligibility;
        let multifamily = values("Multifamily Housing");
        assert!(!rule.evaluate(AFFORDABLE_HOUSING_ACP_OPTION, &multifamily, &config).ok);

        let affordable = multifamily.with(FieldKey::AffordableBoolean, FieldValue::Checked(true));
        assert!(rule.evaluate(AFFORDABLE_HOUSING_ACP_OPTION, &affordable, &config).ok);
    }

    #[test]
    fn acp_option_eligibility_neither_of_exempts_listed_types() {
        let config = FormConfig::for_variant(Variant::DcStaging)
            .with_acp_property_check(AcpPropertyCheck::NeitherOf);
        let rule = RuleKind::AcpOptionEligibility;
        assert!(rule
            .evaluate(AFFORDABLE_HOUSING_ACP_OPTION, &values("Multifamily Housing"), &config)
            .ok);
        assert!(!rule
            .evaluate(AFFORDABLE_HOUSING_ACP_OPTION, &values("Office"), &config)
            .ok);
        assert!(rule.evaluate("Other ACP", &values("Office"), &config).ok);
    }

    #[test]
    fn acp_option_eligibility_follows_configured_option() {
        let file = ConfigFile {
            variant: Some(Variant::DcStaging),
            affordable_housing_acp_option: Some("Affordable Housing ACP".to_string()),
            ..ConfigFile::default()
        };
        let config = FormConfig::from_file_contents(file, Variant::Dc);
        let rule = RuleKind::AcpOptionEligibility;
        assert!(!rule.evaluate("Affordable Housing ACP", &values("Office"), &config).ok);
        assert!(rule.evaluate(AFFORDABLE_HOUSING_ACP_OPTION, &values("Office"), &config).ok);
    }
}
