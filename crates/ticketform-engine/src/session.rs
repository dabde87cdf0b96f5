//! Event wiring for a loaded form.
//!
//! A [`FormSession`] owns the document for the lifetime of the page. It
//! reconciles visibility once on load and then handles one change at a
//! time, each running to completion before the next.

use serde::Serialize;
use tracing::{debug, info, info_span};

use ticketform_model::{ConfigurationError, FieldKey, FieldValue, FormConfig};
use ticketform_rules::{FieldVerdict, RuleSet, Validator};

use crate::binder::ValidationBinder;
use crate::controller::VisibilityController;
use crate::document::FormDocument;
use crate::options::ExtensionReasons;

/// Outcome of one change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    pub field: FieldKey,
    pub verdicts: Vec<FieldVerdict>,
    /// Writes the visibility controller issued.
    pub mutations: usize,
}

impl ChangeReport {
    fn skipped(field: FieldKey) -> Self {
        Self {
            field,
            verdicts: Vec::new(),
            mutations: 0,
        }
    }

    pub fn verdict(&self, field: FieldKey) -> Option<&FieldVerdict> {
        self.verdicts.iter().find(|verdict| verdict.field == field)
    }
}

/// Whole-form check performed on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub verdicts: Vec<FieldVerdict>,
}

impl SubmissionReport {
    pub fn is_blocked(&self) -> bool {
        self.verdicts.iter().any(FieldVerdict::is_blocking)
    }

    pub fn blocking_fields(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.verdicts
            .iter()
            .filter(|verdict| verdict.is_blocking())
            .map(|verdict| verdict.field)
    }
}

pub struct FormSession<'c, D> {
    config: &'c FormConfig,
    controller: VisibilityController<'c>,
    binder: ValidationBinder<'c>,
    reasons: ExtensionReasons,
    document: D,
}

impl<'c, D: FormDocument> FormSession<'c, D> {
    /// Load a rendered form and reconcile its groups with the values it was
    /// rendered with.
    pub fn initialize(config: &'c FormConfig, mut document: D) -> Self {
        let _span = info_span!("initialize", variant = %config.variant()).entered();
        let reasons = document
            .source_options(FieldKey::ExtReason)
            .map(ExtensionReasons::capture)
            .unwrap_or_default();
        let controller = VisibilityController::new(config);
        let applied = controller.reconcile(&mut document, &reasons);
        info!(
            fields = document.fields().len(),
            mutations = applied.mutations,
            "form initialized"
        );
        Self {
            config,
            controller,
            binder: ValidationBinder::new(config),
            reasons,
            document,
        }
    }

    /// Handle a change of `field` to `value`.
    ///
    /// Fields outside the configuration are an error; configured fields the
    /// page does not render are ignored.
    pub fn change(
        &mut self,
        field: FieldKey,
        value: FieldValue,
    ) -> Result<ChangeReport, ConfigurationError> {
        if !self.config.has_field(field) {
            return Err(ConfigurationError::FieldNotEnabled {
                field: field.logical_name().to_string(),
                variant: self.config.variant().to_string(),
            });
        }
        if !self.document.contains(field) {
            debug!(field = %field, "change to absent element ignored");
            return Ok(ChangeReport::skipped(field));
        }
        let _span = info_span!("change", field = %field).entered();
        self.document.set_value(field, value);

        if self.document.is_suppressed(field) {
            self.document.set_suppressed(field, false);
        }
        let verdicts = self.binder.revalidate(field, &mut self.document);
        let applied = self
            .controller
            .transition(&mut self.document, &self.reasons, field);
        for hidden in &applied.hidden {
            if self.binder.clear(*hidden) {
                debug!(field = %hidden, "cleared message of hidden group");
            }
        }
        Ok(ChangeReport {
            field,
            verdicts,
            mutations: applied.mutations,
        })
    }

    /// Handle a change given as a logical name and raw string value.
    pub fn change_named(
        &mut self,
        logical_name: &str,
        raw: &str,
    ) -> Result<ChangeReport, ConfigurationError> {
        let field = logical_name.parse::<FieldKey>()?;
        let value = field.parse_value(raw)?;
        self.change(field, value)
    }

    /// Re-run every transition without a change event.
    pub fn reconcile(&mut self) -> usize {
        self.controller
            .reconcile(&mut self.document, &self.reasons)
            .mutations
    }

    pub fn submit(&mut self) -> SubmissionReport {
        let verdicts = self.binder.check_form(&mut self.document);
        let report = SubmissionReport { verdicts };
        info!(blocked = report.is_blocked(), "form submitted");
        report
    }

    pub fn config(&self) -> &'c FormConfig {
        self.config
    }

    pub fn rules(&self) -> &RuleSet {
        self.binder.rules()
    }

    pub fn validator(&self) -> &Validator<'c> {
        self.binder.validator()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
