//! End-to-end change handling through a form session.

use ticketform_engine::{FormDocument, FormSession, MemoryDocument};
use ticketform_model::{ConfigurationError, FieldKey, FieldRegistry, FieldValue, FormConfig, Variant};
use ticketform_rules::RuleKind;
use ticketform_rules::messages::{INELIGIBLE_AFFORDABLE_HOUSING_ACP, INELIGIBLE_STANDARD_TARGET};

const STANDARD_TARGET: &str = "Standard Target Pathway";

const PATHWAYS: &[&str] = &[
    "",
    "Performance Pathway",
    "Standard Target Pathway",
    "Prescriptive Pathway",
    "Alternative Compliance Pathway",
];

fn selection_form(property_type: &str) -> MemoryDocument {
    MemoryDocument::new()
        .with_select(
            FieldKey::PropertyType,
            &["", "Multifamily Housing", "Restaurant", "Custom Type"],
            property_type,
        )
        .with_field(FieldKey::AffordableBoolean, FieldValue::Checked(false))
        .with_select(FieldKey::Pathway, PATHWAYS, "")
        .with_select(FieldKey::BackupPathway, PATHWAYS, "")
        .with_field(FieldKey::Attachment, FieldValue::text(""))
}

fn offers_standard_target(doc: &MemoryDocument, list: FieldKey) -> bool {
    doc.options(list)
        .unwrap()
        .iter()
        .any(|option| option == STANDARD_TARGET)
}

#[test]
fn eligible_property_keeps_standard_target() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    let report = session
        .change(FieldKey::Pathway, FieldValue::text(STANDARD_TARGET))
        .unwrap();
    assert!(report.verdict(FieldKey::Pathway).unwrap().is_valid());
    assert!(offers_standard_target(session.document(), FieldKey::Pathway));
    assert!(!session.submit().is_blocked());
}

#[test]
fn clearing_property_type_withdraws_standard_target() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    assert!(offers_standard_target(session.document(), FieldKey::Pathway));

    session
        .change(FieldKey::PropertyType, FieldValue::text(""))
        .unwrap();
    let doc = session.document();
    assert!(!offers_standard_target(doc, FieldKey::Pathway));
    assert!(!offers_standard_target(doc, FieldKey::BackupPathway));
}

#[test]
fn ineligible_property_blocks_and_withdraws_standard_target() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    session
        .change(FieldKey::Pathway, FieldValue::text(STANDARD_TARGET))
        .unwrap();

    let report = session
        .change(FieldKey::PropertyType, FieldValue::text("Custom Type"))
        .unwrap();
    let verdict = report.verdict(FieldKey::Pathway).unwrap();
    assert!(verdict.is_blocking());
    assert_eq!(
        verdict.messages().collect::<Vec<_>>(),
        vec![INELIGIBLE_STANDARD_TARGET]
    );

    let doc = session.document();
    assert!(!offers_standard_target(doc, FieldKey::Pathway));
    assert!(!offers_standard_target(doc, FieldKey::BackupPathway));
    assert_eq!(doc.value(FieldKey::Pathway), Some(FieldValue::text("")));
    assert!(!doc.is_suppressed(FieldKey::Pathway));

    session
        .change(FieldKey::PropertyType, FieldValue::text("Restaurant"))
        .unwrap();
    let options = session.document().options(FieldKey::Pathway).unwrap();
    assert_eq!(options[2], STANDARD_TARGET);
    assert_eq!(
        options.iter().filter(|option| *option == STANDARD_TARGET).count(),
        1
    );
}

#[test]
fn prescriptive_notice_is_advisory_and_suppressed() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    let report = session
        .change(FieldKey::Pathway, FieldValue::text("Prescriptive Pathway"))
        .unwrap();
    let verdict = report.verdict(FieldKey::Pathway).unwrap();
    assert!(verdict.is_advisory_only());
    assert_eq!(verdict.failures[0].rule, RuleKind::PrescriptiveNotice);
    assert!(session.document().is_suppressed(FieldKey::Pathway));
    assert!(!session.submit().is_blocked());

    session
        .change(FieldKey::Pathway, FieldValue::text("Performance Pathway"))
        .unwrap();
    assert!(!session.document().is_suppressed(FieldKey::Pathway));
    assert!(session.validator().displayed_for(FieldKey::Pathway).is_none());
}

#[test]
fn acp_on_selection_form_asks_for_backup() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    let report = session
        .change(FieldKey::Pathway, FieldValue::text("Alternative Compliance Pathway"))
        .unwrap();
    let verdict = report.verdict(FieldKey::Pathway).unwrap();
    assert_eq!(verdict.failures[0].rule, RuleKind::BackupPathwayNotice);
    assert!(report.mutations > 0);
}

#[test]
fn hiding_backup_pathway_clears_its_message() {
    let config = FormConfig::for_variant(Variant::DcStaging);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    session
        .change(FieldKey::Pathway, FieldValue::text(STANDARD_TARGET))
        .unwrap();
    assert_eq!(
        session.document().is_group_visible(FieldKey::BackupPathway),
        Some(true)
    );
    session
        .change(FieldKey::BackupPathway, FieldValue::text("Prescriptive Pathway"))
        .unwrap();
    assert!(session
        .validator()
        .displayed_for(FieldKey::BackupPathway)
        .is_some());

    session
        .change(FieldKey::Pathway, FieldValue::text("Performance Pathway"))
        .unwrap();
    let doc = session.document();
    assert_eq!(doc.is_group_visible(FieldKey::BackupPathway), Some(false));
    assert_eq!(doc.value(FieldKey::BackupPathway), Some(FieldValue::text("")));
    assert!(session
        .validator()
        .displayed_for(FieldKey::BackupPathway)
        .is_none());
}

#[test]
fn withdrawn_standard_target_hides_staging_backup() {
    let config = FormConfig::for_variant(Variant::DcStaging);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    session
        .change(FieldKey::Pathway, FieldValue::text(STANDARD_TARGET))
        .unwrap();
    session
        .change(FieldKey::PropertyType, FieldValue::text("Custom Type"))
        .unwrap();
    let doc = session.document();
    assert_eq!(doc.value(FieldKey::Pathway), Some(FieldValue::text("")));
    assert_eq!(doc.is_group_visible(FieldKey::BackupPathway), Some(false));
    assert!(!doc.has_required_marker(FieldKey::BackupPathway));
    assert_eq!(session.reconcile(), 0);
}

#[test]
fn affordable_housing_acp_option_needs_affordable_flag() {
    let config = FormConfig::for_variant(Variant::DcStaging);
    let doc = selection_form("Multifamily Housing")
        .with_field(FieldKey::AcpOption, FieldValue::text(""));
    let mut session = FormSession::initialize(&config, doc);

    let report = session
        .change(
            FieldKey::AcpOption,
            FieldValue::text("Qualifying Affordable Housing ACP"),
        )
        .unwrap();
    let verdict = report.verdict(FieldKey::AcpOption).unwrap();
    assert!(verdict.is_blocking());
    assert_eq!(
        verdict.messages().collect::<Vec<_>>(),
        vec![INELIGIBLE_AFFORDABLE_HOUSING_ACP]
    );
    let submission = session.submit();
    assert!(submission.is_blocked());
    assert_eq!(
        submission.blocking_fields().collect::<Vec<_>>(),
        vec![FieldKey::AcpOption]
    );

    let report = session
        .change(FieldKey::AffordableBoolean, FieldValue::Checked(true))
        .unwrap();
    assert!(report.verdict(FieldKey::AcpOption).unwrap().is_valid());
    assert!(!session.submit().is_blocked());
}

#[test]
fn change_outside_configuration_is_rejected() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    let before = session.document().mutations();
    let err = session
        .change(FieldKey::ExtOrExempt, FieldValue::text("Extension"))
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::FieldNotEnabled { .. }));
    assert_eq!(session.document().mutations(), before);
}

#[test]
fn change_to_unrendered_field_is_skipped() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Restaurant"));
    let before = session.document().mutations();
    let report = session
        .change(FieldKey::NewPathway, FieldValue::text(STANDARD_TARGET))
        .unwrap();
    assert!(report.verdicts.is_empty());
    assert_eq!(report.mutations, 0);
    assert_eq!(session.document().mutations(), before);
}

#[test]
fn named_changes_parse_logical_names() {
    let config = FormConfig::for_variant(Variant::Dc);
    let mut session = FormSession::initialize(&config, selection_form("Multifamily Housing"));
    session.change_named("affordable_boolean", "on").unwrap();
    assert_eq!(
        session.document().value(FieldKey::AffordableBoolean),
        Some(FieldValue::Checked(true))
    );
    assert!(session.change_named("no_such_field", "x").is_err());
}

#[test]
fn snapshot_survives_a_session() {
    let config = FormConfig::for_variant(Variant::Dc);
    let registry = FieldRegistry::new(&config);
    let dir = std::env::temp_dir().join(format!("ticketform-engine-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("form.json");
    std::fs::write(
        &path,
        r#"{"fields": {
            "property_list": {"value": "Custom Type", "options": ["", "Custom Type", "Restaurant"]},
            "pathway_list": {"value": "", "options": ["", "Performance Pathway", "Standard Target Pathway"]},
            "backup_pathway_list": {"value": "", "options": ["", "Performance Pathway"]}
        }}"#,
    )
    .unwrap();

    let doc = MemoryDocument::load(&path, &registry).unwrap();
    let session = FormSession::initialize(&config, doc);
    session.document().save(&path).unwrap();

    let reloaded = MemoryDocument::load(&path, &registry).unwrap();
    assert_eq!(
        reloaded.options(FieldKey::Pathway).unwrap(),
        ["".to_string(), "Performance Pathway".to_string()].as_slice()
    );
    assert_eq!(reloaded.is_group_visible(FieldKey::BackupPathway), Some(false));
    std::fs::remove_dir_all(&dir).ok();
}
