//! Fixed option values the form rules key off.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Property type that unlocks the affordable housing fields.
pub const MULTIFAMILY_HOUSING: &str = "Multifamily Housing";

/// Extension/exemption selector value for an extension request.
pub const EXTENSION: &str = "Extension";

/// Placeholder entries that never count as a selectable reason.
pub const PLACEHOLDER_VALUES: &[&str] = &["", "-----"];

/// Number of leading source reasons that belong to extension requests.
pub const EXTENSION_REASON_COUNT: usize = 4;

/// Default ACP sub-option reserved for affordable housing. Deployments that
/// render a different label set `affordable_housing_acp_option` in the config
/// file.
pub const AFFORDABLE_HOUSING_ACP_OPTION: &str = "Qualifying Affordable Housing ACP";

/// Property type compared alongside multifamily housing by the ACP sub-option rule.
pub const SENIOR_CARE_COMMUNITY: &str = "Senior Care Community (also know as Senior Livi Community)";

/// Property types eligible for the Standard Target Pathway.
pub const HIGH_PERFORMANCE_PROPERTY_TYPES: &[&str] = &[
    "Adult Education",
    "Ambulatory Surgical Center",
    "Multifamily Housing",
    "Automobile Dealership",
    "Bank Branch",
    "Bar/Nightclub",
    "Barracks",
    "Courthouse",
    "College/University",
    "Convenience Store with Gas Station",
    "Convenience Store without Gas Station",
    "Financial Office",
    "Data Center",
    "Drinking Water Treatment & Distribution",
    "Enclosed Mall",
    "Office",
    "Fast Food Restaurant",
    "Food Sales",
    "Food Service",
    "Hospital (General Medical & Surgical)",
    "Hotel",
    "Laboratory",
    "Lifestyle Center",
    "Medical Office",
    "Other - Education",
    "Other - Lodging/Residential",
    "Other - Mall",
    "Other - Restaurant/Bar",
    "Other - Specialty Hospital",
    "Outpatient Rehabilitation/Physical Therapy",
    "Pre-school/Daycare",
    "Prison/Incarceration",
    "Residence Hall/Dormitory",
    "Residential Care Facility",
    "Restaurant",
    "Retail Store",
    "Self-Storage Facility",
    SENIOR_CARE_COMMUNITY,
    "Strip Mall",
    "Supermarket/Grocery Store",
    "Urgent Care/Clinic/Other Outpatient",
    "Veterinary Office",
    "Vocational School",
    "Wastewater Treatment Plant",
    "Wholesale Club/Supercenter",
];

/// Compliance pathway offered in the pathway lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pathway {
    Performance,
    StandardTarget,
    Prescriptive,
    AlternativeCompliance,
}

impl Pathway {
    /// Option value as rendered in the pathway lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::Performance => "Performance Pathway",
            Pathway::StandardTarget => "Standard Target Pathway",
            Pathway::Prescriptive => "Prescriptive Pathway",
            Pathway::AlternativeCompliance => "Alternative Compliance Pathway",
        }
    }

    /// True when `value` is exactly this pathway's option value.
    pub fn matches(&self, value: &str) -> bool {
        value == self.as_str()
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pathway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Performance Pathway" => Ok(Pathway::Performance),
            "Standard Target Pathway" => Ok(Pathway::StandardTarget),
            "Prescriptive Pathway" => Ok(Pathway::Prescriptive),
            "Alternative Compliance Pathway" => Ok(Pathway::AlternativeCompliance),
            _ => Err(format!("Unknown pathway: {s}")),
        }
    }
}
