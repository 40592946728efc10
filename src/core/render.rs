use crate::domain::model::{Matrix, Note, OutputFormat, RenderOptions, Spelling};
use crate::utils::error::{FretboardError, Result};
use serde::Serialize;

/// Flattened cell used for the CSV and TSV renderings.
#[derive(Debug, Serialize)]
struct CellRecord<'a> {
    string: usize,
    fret: usize,
    pitch_class: u8,
    sharp: &'a str,
    flat: &'a str,
    octave: Option<i32>,
    scale_position: Option<u8>,
}

pub fn render(matrix: &Matrix, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Table => Ok(render_table(matrix, options.spelling, options.scale_only)),
        OutputFormat::Csv => render_delimited(matrix, b','),
        OutputFormat::Tsv => render_delimited(matrix, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(matrix)?),
    }
}

/// Strings are numbered from 1, frets from 0 (the open string).
pub fn render_delimited(matrix: &Matrix, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for (string, fret, note) in matrix.cells() {
        writer.serialize(CellRecord {
            string: string + 1,
            fret,
            pitch_class: note.pitch_class.value(),
            sharp: note.sharp_name,
            flat: note.flat_name,
            octave: note.octave,
            scale_position: note.scale_position,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FretboardError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_table(matrix: &Matrix, spelling: Spelling, scale_only: bool) -> String {
    // Without any annotation there is nothing to hide.
    let hide_outside = scale_only && matrix.cells().any(|(_, _, note)| note.in_scale());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(matrix.string_count() + 1);

    let mut header = vec!["fret".to_string()];
    header.extend((0..matrix.fret_positions()).map(|fret| fret.to_string()));
    rows.push(header);

    for (index, notes) in matrix.strings().iter().enumerate() {
        let mut row = vec![(index + 1).to_string()];
        row.extend(notes.iter().map(|note| {
            if hide_outside && !note.in_scale() {
                "-".to_string()
            } else {
                cell_label(note, spelling)
            }
        }));
        rows.push(row);
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ");
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

fn cell_label(note: &Note, spelling: Spelling) -> String {
    let mut label = note.name(spelling).to_string();
    if let Some(octave) = note.octave {
        label.push_str(&octave.to_string());
    }
    if let Some(position) = note.scale_position {
        label.push_str(&format!("({})", position));
    }
    label
}
