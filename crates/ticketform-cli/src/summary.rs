use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ticketform_cli::replay::{CheckResult, GroupRow, MessageRow};
use ticketform_rules::Severity;

pub fn print_check(result: &CheckResult) {
    println!("Variant: {}", result.variant);
    println!(
        "Changes: {} ({} visibility writes)",
        result.changes, result.mutations
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Group"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for group in &result.groups {
        table.add_row(group_row(group));
    }
    println!("{table}");
    print_message_table(&result.messages);
    if result.submitted {
        if result.blocked {
            eprintln!("Submission blocked.");
        } else {
            println!("Submission accepted.");
        }
    }
}

fn group_row(group: &GroupRow) -> Vec<Cell> {
    let value = if group.value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(&group.value)
    };
    let visibility = if group.visible {
        Cell::new("shown").fg(Color::Green)
    } else {
        dim_cell("hidden")
    };
    let required = if group.required {
        Cell::new("*").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    };
    vec![
        Cell::new(group.field.logical_name())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        value,
        visibility,
        required,
    ]
}

fn print_message_table(messages: &[MessageRow]) {
    if messages.is_empty() {
        return;
    }
    let mut ordered = messages.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|row| (severity_rank(row.severity), row.field, row.rule));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Message"),
    ]);
    apply_message_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for row in ordered {
        table.add_row(vec![
            Cell::new(row.field.logical_name()),
            severity_cell(row.severity),
            Cell::new(row.rule.name()),
            Cell::new(strip_markup(row.message)),
        ]);
    }
    println!();
    println!("Messages:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_message_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Blocking => 0,
        Severity::Advisory => 1,
    }
}

pub fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Blocking => Cell::new("BLOCKING")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Advisory => Cell::new("ADVISORY").fg(Color::Yellow),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// Messages carry inline links; a terminal only gets their text.
fn strip_markup(message: &str) -> String {
    let mut text = String::with_capacity(message.len());
    let mut in_tag = false;
    for ch in message.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markup_keeps_link_text() {
        assert_eq!(
            strip_markup("see <a href=\"https://example.org/\">FAQ</a>."),
            "see FAQ."
        );
    }

    #[test]
    fn blocking_sorts_first() {
        assert!(severity_rank(Severity::Blocking) < severity_rank(Severity::Advisory));
    }
}
