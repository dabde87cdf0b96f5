//! Logical form fields and their values.
//!
//! Every field the rule engine knows about is a variant of [`FieldKey`]. The
//! logical name is what configuration and snapshots use; the form key is the
//! suffix the server renders into element ids (`id_<key>` for the input,
//! `id_group_<key>` for the wrapping container).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Logical field of the ticket submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    /// "Affordable Housing" checkbox, only offered for multifamily housing.
    AffordableBoolean,
    /// Primary property type as calculated by Portfolio Manager.
    PropertyType,
    /// Selected compliance pathway.
    Pathway,
    /// Requested pathway on the pathway change application.
    NewPathway,
    /// Backup pathway, required alongside the ACP.
    BackupPathway,
    /// Supporting document upload.
    Attachment,
    /// "Extended delay for qualifying affordable housing" checkbox.
    ExtendedDelayForQah,
    /// Number of years of delay requested.
    DelayYears,
    /// Type of affordable housing.
    TypeAffordableHousing,
    /// First supporting upload for a qualifying affordable housing delay.
    Attachment1,
    /// Delay request upload that stays visible whatever the delay type.
    Attachment2,
    /// Second supporting upload for a qualifying affordable housing delay.
    Attachment3,
    /// ACP sub-option on the delay of compliance request.
    AcpOption,
    /// Extension or exemption selector.
    ExtOrExempt,
    /// Reason for the extension or exemption.
    ExtReason,
}

/// How a field's input is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Select,
    Text,
    Number,
    Checkbox,
    File,
}

impl FieldKey {
    /// Every known field, in registry order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::AffordableBoolean,
            Self::PropertyType,
            Self::Pathway,
            Self::NewPathway,
            Self::BackupPathway,
            Self::Attachment,
            Self::ExtendedDelayForQah,
            Self::DelayYears,
            Self::TypeAffordableHousing,
            Self::Attachment1,
            Self::Attachment2,
            Self::Attachment3,
            Self::AcpOption,
            Self::ExtOrExempt,
            Self::ExtReason,
        ]
    }

    /// Logical name used by configuration and form snapshots.
    pub fn logical_name(&self) -> &'static str {
        match self {
            Self::AffordableBoolean => "affordable_boolean",
            Self::PropertyType => "property_list",
            Self::Pathway => "pathway_list",
            Self::NewPathway => "new_pathway_list",
            Self::BackupPathway => "backup_pathway_list",
            Self::Attachment => "attachment",
            Self::ExtendedDelayForQah => "extended_delay_for_QAH",
            Self::DelayYears => "delay_years",
            Self::TypeAffordableHousing => "type_affordable_housing",
            Self::Attachment1 => "attachment_1",
            Self::Attachment2 => "attachment_2",
            Self::Attachment3 => "attachment_3",
            Self::AcpOption => "acp_option",
            Self::ExtOrExempt => "ext_or_exempt",
            Self::ExtReason => "ext_reason",
        }
    }

    /// Key the server uses when rendering the field.
    pub fn form_key(&self) -> &'static str {
        match self {
            Self::AffordableBoolean => "e_is_affordable_housing",
            Self::PropertyType => "e_property_type",
            Self::Pathway => "e_pathway",
            Self::NewPathway => "e_new_pathway",
            Self::BackupPathway => "e_backup_pathway",
            Self::Attachment => "attachment",
            Self::ExtendedDelayForQah => "e_extended_delay_for_QAH",
            Self::DelayYears => "e_delay_years",
            Self::TypeAffordableHousing => "e_type_affordable_housing",
            Self::Attachment1 => "attachment_1",
            Self::Attachment2 => "attachment_2",
            Self::Attachment3 => "attachment_3",
            Self::AcpOption => "e_acp_option",
            Self::ExtOrExempt => "e_extension_or_exemption",
            Self::ExtReason => "e_extension_reason",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::AffordableBoolean | Self::ExtendedDelayForQah => FieldKind::Checkbox,
            Self::DelayYears => FieldKind::Number,
            Self::Attachment | Self::Attachment1 | Self::Attachment2 | Self::Attachment3 => {
                FieldKind::File
            }
            Self::PropertyType
            | Self::Pathway
            | Self::NewPathway
            | Self::BackupPathway
            | Self::TypeAffordableHousing
            | Self::AcpOption
            | Self::ExtOrExempt
            | Self::ExtReason => FieldKind::Select,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind() == FieldKind::Checkbox
    }

    /// The cleared value for this field (unchecked or empty).
    pub fn empty_value(&self) -> FieldValue {
        if self.is_checkbox() {
            FieldValue::Checked(false)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Parse a raw string into a value of the right shape for this field.
    ///
    /// Checkboxes accept `true/false`, `on/off`, `yes/no` and `1/0`.
    pub fn parse_value(&self, raw: &str) -> Result<FieldValue, ConfigurationError> {
        if !self.is_checkbox() {
            return Ok(FieldValue::Text(raw.to_string()));
        }
        match raw.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" | "checked" => Ok(FieldValue::Checked(true)),
            "false" | "off" | "no" | "0" | "" => Ok(FieldValue::Checked(false)),
            _ => Err(ConfigurationError::InvalidValue {
                field: self.logical_name().to_string(),
                reason: format!("expected a checkbox state, got {raw:?}"),
            }),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.logical_name())
    }
}

impl FromStr for FieldKey {
    type Err = ConfigurationError;

    /// Parse a logical field name. Matching is exact apart from surrounding
    /// whitespace, since names mirror the form definition.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.logical_name() == name)
            .ok_or_else(|| ConfigurationError::UnknownField(s.to_string()))
    }
}

/// Current value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text content; checkboxes read as empty.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Checked(_) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(true))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::Checked(checked) => !checked,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Checked(checked) => write!(f, "{checked}"),
        }
    }
}
