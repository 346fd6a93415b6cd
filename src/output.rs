use crate::columns::{Align, Column};
use anyhow::{Context, Result};
use atty::Stream;
use comfy_table::{presets, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width};
use minijinja::{context, Environment};
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    /// Template source text, already read from disk.
    Template(String),
}

fn visible_cells<'a>(row: &'a [String], visible: &'a [usize]) -> impl Iterator<Item = &'a str> {
    visible
        .iter()
        .map(move |&i| row.get(i).map(String::as_str).unwrap_or_default())
}

/// Bordered table with a rule between every row. `styled` picks the UTF-8
/// preset and terminal-width wrapping; otherwise plain ASCII at natural width.
pub fn render_table<W: Write>(
    out: &mut W,
    columns: &[Column],
    rows: &[Vec<String>],
    visible: &[usize],
    styled: bool,
) -> Result<()> {
    let mut table = Table::new();
    if styled {
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table
            .load_preset(presets::ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Disabled);
    }

    table.set_header(visible.iter().map(|&i| columns[i].label));
    for row in rows {
        table.add_row(visible_cells(row, visible));
    }

    for (position, &index) in visible.iter().enumerate() {
        let spec = &columns[index];
        if let Some(column) = table.column_mut(position) {
            column.set_cell_alignment(match spec.align {
                Align::Left => CellAlignment::Left,
                Align::Center => CellAlignment::Center,
            });
            if let Some(width) = spec.max_width {
                column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(width)));
            }
        }
    }

    writeln!(out, "{table}")?;
    Ok(())
}

/// One CSV record per row, visible columns only, no header line.
pub fn render_csv<W: Write>(out: &mut W, rows: &[Vec<String>], visible: &[usize]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    for row in rows {
        writer
            .write_record(visible_cells(row, visible))
            .context("Failed to write CSV record")?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders `source` with `columns` (visible labels) and `rows`, where each
/// row maps every column's field name to its cell.
pub fn render_template<W: Write>(
    out: &mut W,
    source: &str,
    columns: &[Column],
    rows: &[Vec<String>],
    visible: &[usize],
) -> Result<()> {
    let mut env = Environment::new();
    env.add_template("output", source)
        .context("Failed to parse template")?;
    let template = env.get_template("output")?;

    let labels: Vec<&str> = visible.iter().map(|&i| columns[i].label).collect();
    let records: Vec<BTreeMap<String, &str>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.field_name(), cell.as_str()))
                .collect()
        })
        .collect();

    let rendered = template
        .render(context! { columns => labels, rows => records })
        .context("Failed to render template")?;

    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_questions(
    format: &OutputFormat,
    columns: &[Column],
    rows: &[Vec<String>],
    visible: &[usize],
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Table => {
            render_table(&mut out, columns, rows, visible, atty::is(Stream::Stdout))
        }
        OutputFormat::Csv => render_csv(&mut out, rows, visible),
        OutputFormat::Template(source) => render_template(&mut out, source, columns, rows, visible),
    }
}
