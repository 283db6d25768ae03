//! Terminal summaries for validation and scoring.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pt_engine::{ScoreBand, classify_z_score, classify_zeta_score};
use pt_ingest::TableFormat;
use pt_model::{CalculationResult, ParticipantRecord};
use pt_validate::ValidatedData;

pub fn print_validation_summary(input: &Path, data: &ValidatedData) {
    let format = match pt_ingest::TableSource::open(input).map(|s| s.format()) {
        Ok(TableFormat::Csv) => "CSV",
        Ok(TableFormat::Spreadsheet) => "Excel",
        Err(_) => "unknown",
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("File"), Cell::new(input.display())]);
    table.add_row(vec![header_cell("Format"), Cell::new(format)]);
    table.add_row(vec![
        header_cell("Participants"),
        Cell::new(data.records.len()),
    ]);
    table.add_row(vec![
        header_cell("ID column"),
        Cell::new(&data.mapping.participant_id_col),
    ]);
    table.add_row(vec![
        header_cell("Result column"),
        Cell::new(&data.mapping.result_col),
    ]);
    table.add_row(vec![
        header_cell("Uncertainty column"),
        Cell::new(data.mapping.uncertainty_col.as_deref().unwrap_or("-")),
    ]);
    println!("{table}");
}

pub fn print_scores(records: &[ParticipantRecord], result: &CalculationResult) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Participant"),
        header_cell("Result"),
        header_cell("z"),
        header_cell("z band"),
        header_cell("zeta"),
        header_cell("zeta band"),
    ]);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (i, record) in records.iter().enumerate() {
        let z = result.z_scores.get(i).copied();
        let zeta = result.zeta_scores.get(i).copied();
        table.add_row(vec![
            Cell::new(&record.participant_id),
            Cell::new(format!("{:.4}", record.result)),
            score_cell(z),
            band_cell(z.map(classify_z_score)),
            score_cell(zeta),
            band_cell(zeta.map(classify_zeta_score)),
        ]);
    }
    println!("{table}");
}

fn score_cell(score: Option<f64>) -> Cell {
    match score {
        Some(value) => Cell::new(format!("{value:.3}")),
        None => dim_cell("-"),
    }
}

fn band_cell(band: Option<ScoreBand>) -> Cell {
    match band {
        Some(ScoreBand::Satisfactory) => Cell::new("satisfactory").fg(Color::Green),
        Some(ScoreBand::Questionable) => Cell::new("questionable").fg(Color::Yellow),
        Some(ScoreBand::Unsatisfactory) => Cell::new("unsatisfactory")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
