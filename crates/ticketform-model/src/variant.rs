//! Deployment variants of the ticket form scripts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Pathway;
use crate::error::ConfigurationError;
use crate::field::FieldKey;

/// Deployment the form is rendered for.
///
/// Each deployment renders a slightly different subset of fields and a
/// slightly different rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// DC pathway selection and pathway change forms.
    #[default]
    Dc,
    /// DC staging: adds the delay of compliance request form.
    DcStaging,
    /// Ann Arbor extension/exemption request form.
    AnnArbor,
}

/// Which control drives the affordable housing type group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffordableTypeDriver {
    /// Shown for multifamily housing flagged as affordable.
    AffordableBoolean,
    /// Shown with the other QAH fields when the extended delay is requested.
    ExtendedDelay,
}

const DC_FIELDS: &[FieldKey] = &[
    FieldKey::AffordableBoolean,
    FieldKey::PropertyType,
    FieldKey::Pathway,
    FieldKey::NewPathway,
    FieldKey::BackupPathway,
    FieldKey::Attachment,
    FieldKey::TypeAffordableHousing,
];

const DC_STAGING_FIELDS: &[FieldKey] = &[
    FieldKey::AffordableBoolean,
    FieldKey::PropertyType,
    FieldKey::Pathway,
    FieldKey::NewPathway,
    FieldKey::BackupPathway,
    FieldKey::Attachment,
    FieldKey::ExtendedDelayForQah,
    FieldKey::DelayYears,
    FieldKey::TypeAffordableHousing,
    FieldKey::Attachment1,
    FieldKey::Attachment2,
    FieldKey::Attachment3,
    FieldKey::AcpOption,
];

const ANN_ARBOR_FIELDS: &[FieldKey] = &[FieldKey::ExtOrExempt, FieldKey::ExtReason];

impl Variant {
    pub const fn all() -> &'static [Self] {
        &[Self::Dc, Self::DcStaging, Self::AnnArbor]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Dc => "dc",
            Variant::DcStaging => "dc-staging",
            Variant::AnnArbor => "ann-arbor",
        }
    }

    /// Fields rendered by this deployment's forms.
    pub fn fields(&self) -> &'static [FieldKey] {
        match self {
            Variant::Dc => DC_FIELDS,
            Variant::DcStaging => DC_STAGING_FIELDS,
            Variant::AnnArbor => ANN_ARBOR_FIELDS,
        }
    }

    /// Pathways that require a backup pathway and an ACP attachment.
    pub fn backup_triggers(&self) -> &'static [Pathway] {
        match self {
            Variant::Dc | Variant::AnnArbor => &[Pathway::AlternativeCompliance],
            Variant::DcStaging => &[Pathway::AlternativeCompliance, Pathway::StandardTarget],
        }
    }

    /// Groups shown and required while the extended QAH delay is requested.
    pub fn qah_groups(&self) -> &'static [FieldKey] {
        match self {
            Variant::DcStaging => &[
                FieldKey::Attachment1,
                FieldKey::TypeAffordableHousing,
                FieldKey::Attachment3,
            ],
            Variant::Dc | Variant::AnnArbor => &[],
        }
    }

    pub fn affordable_type_driver(&self) -> AffordableTypeDriver {
        match self {
            Variant::DcStaging => AffordableTypeDriver::ExtendedDelay,
            Variant::Dc | Variant::AnnArbor => AffordableTypeDriver::AffordableBoolean,
        }
    }

    /// Whether picking the Standard Target Pathway shows an advisory notice.
    pub fn warns_on_standard_target(&self) -> bool {
        matches!(self, Variant::DcStaging)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "dc" => Ok(Variant::Dc),
            "dc-staging" | "staging" => Ok(Variant::DcStaging),
            "ann-arbor" | "annarbor" | "a2" => Ok(Variant::AnnArbor),
            _ => Err(ConfigurationError::UnknownVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_str() {
        assert_eq!("DC".parse::<Variant>().unwrap(), Variant::Dc);
        assert_eq!("dc_staging".parse::<Variant>().unwrap(), Variant::DcStaging);
        assert_eq!("Ann-Arbor".parse::<Variant>().unwrap(), Variant::AnnArbor);
        assert!("boston".parse::<Variant>().is_err());
    }

    #[test]
    fn test_qah_groups_are_rendered_fields() {
        for variant in Variant::all() {
            for group in variant.qah_groups() {
                assert!(variant.fields().contains(group), "{variant}: {group}");
            }
        }
    }
}
