use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use icd_map::CatalogStatistics;
use icd_model::{MappingResult, MatchSource};
use icd_report::{
    ConfidenceLevel, ConfidenceThresholds, MappingStatistics, UNKNOWN_CODE, review_queue,
};

use crate::types::{LookupResult, MapResult};

/// Prints the run summary. Goes to stderr when results were written to
/// stdout, so piped output stays machine-readable.
pub fn print_map_summary(result: &MapResult) {
    let thresholds = ConfidenceThresholds::default();
    let stats = MappingStatistics::from_results_with(
        &result.results,
        result.config.confidence_threshold,
        &thresholds,
    );
    let mut lines = vec![format!("Input: {}", result.input.display())];
    if let Some(path) = &result.output {
        lines.push(format!("Output: {}", path.display()));
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Patients"), Cell::new(stats.total_patients)]);
    table.add_row(vec![
        Cell::new("Rows without diagnoses"),
        count_cell(result.ingest.empty_diagnoses, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Diagnoses mapped"),
        Cell::new(stats.total_mappings),
    ]);
    table.add_row(vec![
        Cell::new("Average confidence"),
        Cell::new(format!("{:.2}", stats.average_confidence)),
    ]);
    table.add_row(vec![
        Cell::new(format!(
            "High confidence (>= {:.2})",
            result.config.confidence_threshold
        )),
        Cell::new(format!(
            "{} ({:.1}%)",
            stats.high_confidence_count,
            stats.percent(stats.high_confidence_count)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Unmapped"),
        count_cell(stats.unmapped_count, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Unique codes"),
        Cell::new(stats.unique_codes),
    ]);

    let mut distribution = Table::new();
    distribution.set_header(vec![
        header_cell("Confidence"),
        header_cell("Range"),
        header_cell("Mappings"),
    ]);
    apply_table_style(&mut distribution);
    align_column(&mut distribution, 2, CellAlignment::Right);
    for level in ConfidenceLevel::DESCENDING {
        let count = stats.distribution.get(&level).copied().unwrap_or(0);
        distribution.add_row(vec![
            level_cell(level),
            dim_cell(thresholds.range_label(level)),
            Cell::new(count),
        ]);
    }

    let review = review_queue(&result.results, result.config.confidence_threshold).len();
    lines.push(table.to_string());
    lines.push(distribution.to_string());
    lines.push(format!("Needs review: {review}"));

    let text = lines.join("\n");
    if result.output.is_some() {
        println!("{text}");
    } else {
        eprintln!("{text}");
    }
}

pub fn print_lookup(result: &LookupResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Diagnosis"),
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Confidence"),
        header_cell("Source"),
        header_cell("Alternatives"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    let threshold = result.config.confidence_threshold;
    for mapping in &result.results {
        table.add_row(vec![
            Cell::new(&mapping.original_diagnosis),
            code_cell(mapping),
            Cell::new(
                mapping
                    .description
                    .as_deref()
                    .unwrap_or(mapping.justification.as_str()),
            ),
            confidence_cell(mapping.confidence, mapping.needs_review(threshold)),
            source_cell(mapping.source),
            alternatives_cell(mapping),
        ]);
    }
    println!("{table}");
}

pub fn print_catalog(stats: &CatalogStatistics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Codes")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (category, count) in &stats.categories {
        table.add_row(vec![Cell::new(category.as_str()), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_codes).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Pattern rules: {}", stats.total_rules);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn code_cell(mapping: &MappingResult) -> Cell {
    match mapping.code.as_deref() {
        Some(code) => Cell::new(code)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => Cell::new(UNKNOWN_CODE).fg(Color::Red),
    }
}

fn confidence_cell(confidence: f64, needs_review: bool) -> Cell {
    let cell = Cell::new(format!("{confidence:.2}"));
    if needs_review {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Green)
    }
}

fn source_cell(source: Option<MatchSource>) -> Cell {
    match source {
        Some(source) => Cell::new(source.as_str()),
        None => dim_cell("-"),
    }
}

fn alternatives_cell(mapping: &MappingResult) -> Cell {
    if mapping.alternatives.is_empty() {
        return dim_cell("-");
    }
    let codes: Vec<&str> = mapping
        .alternatives
        .iter()
        .map(|alt| alt.code.as_str())
        .collect();
    Cell::new(codes.join(", "))
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::VeryHigh | ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(level.label()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
