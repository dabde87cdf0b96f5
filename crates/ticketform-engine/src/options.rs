//! Option list derivations.

use ticketform_model::Pathway;
use ticketform_model::catalog::{EXTENSION, EXTENSION_REASON_COUNT, PLACEHOLDER_VALUES};

/// Index the Standard Target option is re-inserted at: after the empty
/// placeholder and the first pathway.
pub const STANDARD_TARGET_POSITION: usize = 2;

/// Extension and exemption reasons split from the server-rendered list.
///
/// Captured once when the form loads; every rebuild derives from this
/// capture, never from whatever the list currently offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionReasons {
    extension: Vec<String>,
    exemption: Vec<String>,
}

impl ExtensionReasons {
    /// Split a source option list. The first four real reasons belong to
    /// extensions, the rest to exemptions.
    pub fn capture(source: &[String]) -> Self {
        let mut reasons = source
            .iter()
            .filter(|value| !PLACEHOLDER_VALUES.contains(&value.as_str()))
            .cloned()
            .collect::<Vec<_>>();
        let exemption = reasons.split_off(EXTENSION_REASON_COUNT.min(reasons.len()));
        Self {
            extension: reasons,
            exemption,
        }
    }

    pub fn extension(&self) -> &[String] {
        &self.extension
    }

    pub fn exemption(&self) -> &[String] {
        &self.exemption
    }

    /// Options offered for an extension-or-exemption selection, led by an
    /// empty placeholder.
    pub fn options_for(&self, selection: &str) -> Vec<String> {
        let reasons = if selection == EXTENSION {
            &self.extension
        } else {
            &self.exemption
        };
        std::iter::once(String::new())
            .chain(reasons.iter().cloned())
            .collect()
    }
}

/// The pathway list after gating the Standard Target option, or `None` when
/// the list already matches.
///
/// Removal drops every copy. Insertion only happens when the option is
/// absent, so repeated toggling never duplicates it. Lists shorter than the
/// insertion index get the option appended.
pub fn gate_standard_target(options: &[String], offered: bool) -> Option<Vec<String>> {
    let value = Pathway::StandardTarget.as_str();
    let present = options.iter().any(|option| option == value);
    match (offered, present) {
        (true, false) => {
            let mut updated = options.to_vec();
            let position = STANDARD_TARGET_POSITION.min(updated.len());
            updated.insert(position, value.to_string());
            Some(updated)
        }
        (false, true) => Some(
            options
                .iter()
                .filter(|option| *option != value)
                .cloned()
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn capture_skips_placeholders() {
        let reasons = ExtensionReasons::capture(&strings(&[
            "", "-----", "A", "B", "C", "D", "E", "F",
        ]));
        assert_eq!(reasons.extension(), strings(&["A", "B", "C", "D"]).as_slice());
        assert_eq!(reasons.exemption(), strings(&["E", "F"]).as_slice());
    }

    #[test]
    fn capture_handles_short_lists() {
        let reasons = ExtensionReasons::capture(&strings(&["", "A", "B"]));
        assert_eq!(reasons.extension().len(), 2);
        assert!(reasons.exemption().is_empty());
    }

    #[test]
    fn options_for_leads_with_placeholder() {
        let reasons = ExtensionReasons::capture(&strings(&["", "A", "B", "C", "D", "E"]));
        assert_eq!(reasons.options_for("Extension"), strings(&["", "A", "B", "C", "D"]));
        assert_eq!(reasons.options_for("Financial Distress"), strings(&["", "E"]));
    }

    #[test]
    fn gate_inserts_after_first_pathway() {
        let list = strings(&["", "Performance Pathway", "Prescriptive Pathway"]);
        let updated = gate_standard_target(&list, true).unwrap();
        assert_eq!(
            updated,
            strings(&[
                "",
                "Performance Pathway",
                "Standard Target Pathway",
                "Prescriptive Pathway"
            ])
        );
        assert!(gate_standard_target(&updated, true).is_none());
    }

    #[test]
    fn gate_removes_option() {
        let list = strings(&["", "Performance Pathway", "Standard Target Pathway"]);
        let updated = gate_standard_target(&list, false).unwrap();
        assert_eq!(updated, strings(&["", "Performance Pathway"]));
        assert!(gate_standard_target(&updated, false).is_none());
    }

    #[test]
    fn gate_appends_to_short_lists() {
        let updated = gate_standard_target(&strings(&[""]), true).unwrap();
        assert_eq!(updated, strings(&["", "Standard Target Pathway"]));
    }
}
