//! Fixed messages rendered next to a failing field.
//!
//! Messages are HTML fragments; the validation layer inserts them verbatim.

pub const INELIGIBLE_STANDARD_TARGET: &str = "This property type is not eligible for the Standard Target Pathway, please select another pathway.";

pub const PRESCRIPTIVE_SELECTED: &str = "You have selected the Prescriptive Pathway, please note that DOEE will not approve this selection until the building owner has submitted an energy audit. For more information please see this <a href=\"https://dc.beam-portal.org/helpdesk/kb/BEPS/55/\">FAQ</a>.";

/// Staging-only notice. Wording pending confirmation from the program office.
pub const STANDARD_TARGET_SELECTED: &str = "If selecting the Standard Target Pathway, you must select a Backup Pathway.";

pub const ACP_REQUIRES_BACKUP: &str = "If selecting the ACP, you must select a Backup Pathway and attach an ACP proposal with supporting documentation as specified in <a href=\"https://dc.beam-portal.org/helpdesk/kb/BEPS_Guidebook/69/\">Chapter 4</a> of the <a href=\"https://dc.beam-portal.org/helpdesk/kb/BEPS_Guidebook/\">BEPS Guidebook</a>.";

pub const ACP_REQUIRES_ATTACHMENT: &str = "If selecting the ACP, you must attach an ACP proposal with supporting documentation as specified in <a href=\"https://dc.beam-portal.org/helpdesk/kb/BEPS_Guidebook/69/\">Chapter 4</a> of the <a href=\"https://dc.beam-portal.org/helpdesk/kb/BEPS_Guidebook/\">BEPS Guidebook</a>.";

/// Staging-only message. Wording pending confirmation from the program office.
pub const INELIGIBLE_AFFORDABLE_HOUSING_ACP: &str = "This ACP option is only available to properties marked as affordable housing.";
