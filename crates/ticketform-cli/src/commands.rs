use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use ticketform_cli::replay::{CheckResult, replay};
use ticketform_engine::{FormSession, MemoryDocument};
use ticketform_model::{FieldKey, FieldRegistry, FormConfig};
use ticketform_rules::RuleSet;

use crate::cli::{CheckArgs, Cli};
use crate::summary::{apply_table_style, header_cell, severity_cell};

/// Build the configuration from `--variant` and `--config`.
pub fn load_config(cli: &Cli) -> Result<FormConfig> {
    let Some(path) = &cli.config else {
        return Ok(FormConfig::for_variant(cli.variant.unwrap_or_default()));
    };
    let config = FormConfig::load(path, cli.variant.unwrap_or_default())
        .with_context(|| format!("load config {}", path.display()))?;
    if let Some(variant) = cli.variant
        && variant != config.variant()
    {
        bail!(
            "--variant {variant} conflicts with variant {} in {}",
            config.variant(),
            path.display()
        );
    }
    Ok(config)
}

pub fn run_fields(config: &FormConfig) -> Result<()> {
    let registry = FieldRegistry::new(config);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Input"),
        header_cell("Group"),
    ]);
    apply_table_style(&mut table);
    for (key, selectors) in registry.iter() {
        table.add_row(vec![
            key.logical_name().to_string(),
            format!("{:?}", key.kind()),
            selectors.input.clone(),
            selectors.group.clone(),
        ]);
    }
    println!("Variant: {}", config.variant());
    println!("{table}");
    Ok(())
}

pub fn run_rules(config: &FormConfig) -> Result<()> {
    let rules = RuleSet::for_config(config);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Depends on"),
    ]);
    apply_table_style(&mut table);
    for binding in rules.iter() {
        let dependencies = binding
            .rule
            .dependencies()
            .iter()
            .map(FieldKey::logical_name)
            .collect::<Vec<_>>();
        table.add_row(vec![
            Cell::new(binding.field.logical_name()),
            Cell::new(binding.rule.name()),
            severity_cell(binding.rule.severity()),
            Cell::new(if dependencies.is_empty() {
                "-".to_string()
            } else {
                dependencies.join(", ")
            }),
        ]);
    }
    println!("Variant: {}", config.variant());
    println!("{table}");
    Ok(())
}

pub fn run_check(config: &FormConfig, args: &CheckArgs) -> Result<CheckResult> {
    let span = info_span!("check", form = %args.form.display());
    let _guard = span.enter();

    let registry = FieldRegistry::new(config);
    let document = MemoryDocument::load(&args.form, &registry)
        .with_context(|| format!("load form {}", args.form.display()))?;
    let mut session = FormSession::initialize(config, document);
    let result = replay(&mut session, &args.set, args.submit).context("replay changes")?;

    if let Some(path) = &args.output {
        session
            .document()
            .save(path)
            .with_context(|| format!("write form {}", path.display()))?;
        info!(path = %path.display(), "wrote form snapshot");
    }
    Ok(result)
}
