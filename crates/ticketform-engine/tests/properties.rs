//! Property tests over arbitrary change sequences.

use proptest::prelude::*;

use ticketform_engine::{FormDocument, FormSession, MemoryDocument};
use ticketform_model::{FieldKey, FieldValue, FormConfig, Variant};

const STANDARD_TARGET: &str = "Standard Target Pathway";

const PATHWAYS: &[&str] = &[
    "",
    "Performance Pathway",
    "Standard Target Pathway",
    "Prescriptive Pathway",
    "Alternative Compliance Pathway",
];

const PROPERTY_TYPES: &[&str] = &[
    "",
    "Multifamily Housing",
    "Restaurant",
    "Office",
    "Custom Type",
    "Parking",
];

#[derive(Debug, Clone)]
enum Change {
    PropertyType(&'static str),
    Pathway(&'static str),
    Affordable(bool),
}

fn change() -> impl Strategy<Value = Change> {
    prop_oneof![
        prop::sample::select(PROPERTY_TYPES).prop_map(Change::PropertyType),
        prop::sample::select(PATHWAYS).prop_map(Change::Pathway),
        any::<bool>().prop_map(Change::Affordable),
    ]
}

fn variant() -> impl Strategy<Value = Variant> {
    prop::sample::select(vec![Variant::Dc, Variant::DcStaging])
}

fn selection_form() -> MemoryDocument {
    MemoryDocument::new()
        .with_select(FieldKey::PropertyType, PROPERTY_TYPES, "")
        .with_field(FieldKey::AffordableBoolean, FieldValue::Checked(false))
        .with_select(FieldKey::TypeAffordableHousing, &["", "Public Housing"], "")
        .with_select(FieldKey::Pathway, PATHWAYS, "")
        .with_select(FieldKey::BackupPathway, PATHWAYS, "")
        .with_field(FieldKey::Attachment, FieldValue::text(""))
}

fn standard_target_count(doc: &MemoryDocument, list: FieldKey) -> usize {
    doc.options(list)
        .unwrap_or_default()
        .iter()
        .filter(|option| *option == STANDARD_TARGET)
        .count()
}

/// Apply a change the way a user could: hidden groups and options the list
/// no longer offers cannot be picked.
fn run(session: &mut FormSession<'_, MemoryDocument>, change: &Change) {
    let (field, value) = match change {
        Change::PropertyType(value) => (FieldKey::PropertyType, FieldValue::text(*value)),
        Change::Pathway(value) => (FieldKey::Pathway, FieldValue::text(*value)),
        Change::Affordable(checked) => (FieldKey::AffordableBoolean, FieldValue::Checked(*checked)),
    };
    let doc = session.document();
    if doc.is_group_visible(field) == Some(false) {
        return;
    }
    if let Some(options) = doc.options(field)
        && !options.iter().any(|option| option == value.as_str())
    {
        return;
    }
    session.change(field, value).unwrap();
}

proptest! {
    #[test]
    fn standard_target_offered_once_iff_eligible(
        variant in variant(),
        changes in prop::collection::vec(change(), 1..24),
    ) {
        let config = FormConfig::for_variant(variant);
        let mut session = FormSession::initialize(&config, selection_form());
        let mut last_property = "";
        for change in &changes {
            run(&mut session, change);
            if let Change::PropertyType(value) = change {
                last_property = value;
            }
        }
        let doc = session.document();
        for list in [FieldKey::Pathway, FieldKey::BackupPathway] {
            let count = standard_target_count(doc, list);
            prop_assert!(count <= 1);
            let expected = usize::from(config.is_high_performance(last_property));
            prop_assert_eq!(count, expected);
        }
    }

    #[test]
    fn reconcile_after_changes_is_a_no_op(
        variant in variant(),
        changes in prop::collection::vec(change(), 0..24),
    ) {
        let config = FormConfig::for_variant(variant);
        let mut session = FormSession::initialize(&config, selection_form());
        for change in &changes {
            run(&mut session, change);
        }
        let before = session.document().mutations();
        prop_assert_eq!(session.reconcile(), 0);
        prop_assert_eq!(session.document().mutations(), before);
    }

    #[test]
    fn backup_pathway_visible_iff_pathway_triggers(
        variant in variant(),
        changes in prop::collection::vec(change(), 0..24),
    ) {
        let config = FormConfig::for_variant(variant);
        let mut session = FormSession::initialize(&config, selection_form());
        for change in &changes {
            run(&mut session, change);
        }
        let doc = session.document();
        let pathway = doc.value(FieldKey::Pathway).unwrap_or_default();
        let triggered = config.is_backup_trigger(pathway.as_str());
        prop_assert_eq!(doc.is_group_visible(FieldKey::BackupPathway), Some(triggered));
        prop_assert_eq!(doc.has_required_marker(FieldKey::BackupPathway), triggered);
        if !triggered {
            prop_assert_eq!(doc.value(FieldKey::BackupPathway), Some(FieldValue::text("")));
        }
    }

    #[test]
    fn standard_delay_never_exceeds_three_years(years in 0u32..40) {
        let config = FormConfig::for_variant(Variant::DcStaging);
        let doc = MemoryDocument::new()
            .with_field(FieldKey::ExtendedDelayForQah, FieldValue::Checked(false))
            .with_field(FieldKey::DelayYears, FieldValue::text(years.to_string()));
        let session = FormSession::initialize(&config, doc);
        let value = session.document().value(FieldKey::DelayYears).unwrap_or_default();
        let clamped = value.as_str().parse::<u32>().unwrap();
        prop_assert_eq!(clamped, years.min(3));
    }
}
