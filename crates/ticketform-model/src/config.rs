//! Immutable form configuration.
//!
//! A [`FormConfig`] is built once at startup, either from a [`Variant`]'s
//! built-in constants or from a JSON config file layered over them, and is
//! then shared by reference with every component of the engine.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{
    AFFORDABLE_HOUSING_ACP_OPTION, HIGH_PERFORMANCE_PROPERTY_TYPES, MULTIFAMILY_HOUSING, Pathway,
    SENIOR_CARE_COMMUNITY,
};
use crate::error::{FormError, Result};
use crate::field::FieldKey;
use crate::variant::{AffordableTypeDriver, Variant};

/// Property type condition used by the ACP sub-option eligibility rule.
///
/// The deployed forms combine the two comparisons with `||`, which holds for
/// every property type. The "neither of the two" reading is available for
/// deployments that want it; the deployed one is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcpPropertyCheck {
    /// `type != multifamily || type != senior care`, as deployed.
    #[default]
    Literal,
    /// `type != multifamily && type != senior care`.
    NeitherOf,
}

impl AcpPropertyCheck {
    pub fn holds(&self, property_type: &str) -> bool {
        match self {
            Self::Literal => {
                property_type != MULTIFAMILY_HOUSING || property_type != SENIOR_CARE_COMMUNITY
            }
            Self::NeitherOf => {
                property_type != MULTIFAMILY_HOUSING && property_type != SENIOR_CARE_COMMUNITY
            }
        }
    }
}

/// On-disk configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub variant: Option<Variant>,
    /// Replaces the built-in high-performance allow-list.
    pub high_performance_property_types: Option<Vec<String>>,
    /// Extends the allow-list (applied after any replacement).
    pub additional_high_performance_property_types: Vec<String>,
    pub acp_property_check: Option<AcpPropertyCheck>,
    /// ACP sub-option reserved for affordable housing, as the deployment
    /// renders it.
    pub affordable_housing_acp_option: Option<String>,
}

/// Configuration shared by the visibility controller and validation binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    variant: Variant,
    fields: BTreeSet<FieldKey>,
    high_performance: BTreeSet<String>,
    acp_property_check: AcpPropertyCheck,
    affordable_housing_acp_option: String,
}

impl FormConfig {
    /// Built-in configuration for a deployment.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            fields: variant.fields().iter().copied().collect(),
            high_performance: HIGH_PERFORMANCE_PROPERTY_TYPES
                .iter()
                .map(|value| (*value).to_string())
                .collect(),
            acp_property_check: AcpPropertyCheck::default(),
            affordable_housing_acp_option: AFFORDABLE_HOUSING_ACP_OPTION.to_string(),
        }
    }

    /// Layer a config file over the built-in configuration for `fallback`.
    pub fn from_file_contents(file: ConfigFile, fallback: Variant) -> Self {
        let mut config = Self::for_variant(file.variant.unwrap_or(fallback));
        if let Some(types) = file.high_performance_property_types {
            config.high_performance = types.into_iter().collect();
        }
        config
            .high_performance
            .extend(file.additional_high_performance_property_types);
        if let Some(check) = file.acp_property_check {
            config.acp_property_check = check;
        }
        if let Some(option) = file.affordable_housing_acp_option {
            config.affordable_housing_acp_option = option;
        }
        config.log_open_questions();
        config
    }

    /// Read a JSON config file.
    pub fn load(path: &Path, fallback: Variant) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&contents).map_err(|source| FormError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "loaded form configuration");
        Ok(Self::from_file_contents(file, fallback))
    }

    #[must_use]
    pub fn with_acp_property_check(mut self, check: AcpPropertyCheck) -> Self {
        self.acp_property_check = check;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.iter().copied()
    }

    pub fn has_field(&self, field: FieldKey) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_high_performance(&self, property_type: &str) -> bool {
        self.high_performance.contains(property_type)
    }

    pub fn high_performance_types(&self) -> impl Iterator<Item = &str> {
        self.high_performance.iter().map(String::as_str)
    }

    pub fn acp_property_check(&self) -> AcpPropertyCheck {
        self.acp_property_check
    }

    pub fn affordable_housing_acp_option(&self) -> &str {
        &self.affordable_housing_acp_option
    }

    pub fn is_backup_trigger(&self, pathway: &str) -> bool {
        self.variant
            .backup_triggers()
            .iter()
            .any(|trigger| trigger.matches(pathway))
    }

    pub fn backup_triggers(&self) -> &'static [Pathway] {
        self.variant.backup_triggers()
    }

    pub fn qah_groups(&self) -> &'static [FieldKey] {
        self.variant.qah_groups()
    }

    pub fn affordable_type_driver(&self) -> AffordableTypeDriver {
        self.variant.affordable_type_driver()
    }

    fn log_open_questions(&self) {
        if self.has_field(FieldKey::AcpOption) && self.acp_property_check == AcpPropertyCheck::Literal
        {
            warn!(
                variant = %self.variant,
                "acp option eligibility uses the deployed `||` property check, which matches every property type"
            );
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_check_holds_for_every_property_type() {
        let check = AcpPropertyCheck::Literal;
        assert!(check.holds(MULTIFAMILY_HOUSING));
        assert!(check.holds(SENIOR_CARE_COMMUNITY));
        assert!(check.holds("Office"));
    }

    #[test]
    fn neither_of_check_excludes_both_types() {
        let check = AcpPropertyCheck::NeitherOf;
        assert!(!check.holds(MULTIFAMILY_HOUSING));
        assert!(!check.holds(SENIOR_CARE_COMMUNITY));
        assert!(check.holds("Office"));
    }

    #[test]
    fn config_file_overrides_allow_list() {
        let file: ConfigFile = serde_json::from_str(
            r#"{
                "variant": "dc-staging",
                "high_performance_property_types": ["Office"],
                "additional_high_performance_property_types": ["Custom Type"],
                "acp_property_check": "neither-of"
            }"#,
        )
        .expect("parse config");
        let config = FormConfig::from_file_contents(file, Variant::Dc);
        assert_eq!(config.variant(), Variant::DcStaging);
        assert!(config.is_high_performance("Office"));
        assert!(config.is_high_performance("Custom Type"));
        assert!(!config.is_high_performance("Restaurant"));
        assert_eq!(config.acp_property_check(), AcpPropertyCheck::NeitherOf);
        assert_eq!(
            config.affordable_housing_acp_option(),
            AFFORDABLE_HOUSING_ACP_OPTION
        );
    }

    #[test]
    fn config_file_renames_affordable_housing_acp_option() {
        let file: ConfigFile = serde_json::from_str(
            r#"{"variant": "dc-staging", "affordable_housing_acp_option": "Affordable Housing ACP"}"#,
        )
        .expect("parse config");
        let config = FormConfig::from_file_contents(file, Variant::Dc);
        assert_eq!(config.affordable_housing_acp_option(), "Affordable Housing ACP");
    }

    #[test]
    fn config_file_rejects_unknown_keys() {
        let parsed = serde_json::from_str::<ConfigFile>(r#"{"variants": "dc"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn backup_triggers_follow_variant() {
        let dc = FormConfig::for_variant(Variant::Dc);
        assert!(dc.is_backup_trigger("Alternative Compliance Pathway"));
        assert!(!dc.is_backup_trigger("Standard Target Pathway"));
        let staging = FormConfig::for_variant(Variant::DcStaging);
        assert!(staging.is_backup_trigger("Standard Target Pathway"));
    }
}
