use std::collections::HashMap;
use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use tracing::{debug, info, instrument};

use crate::insanity::tools::error::{Result, ToolError};
use crate::insanity::tools::model::{RawRow, RawTable, Table};
use crate::insanity::tools::schema;

/// Reads every sheet of the workbook at `path` and returns the normalized
/// table, one category per sheet.
pub fn read_table(path: &Path) -> Result<Table> {
    let raw = read_raw_table(path)?;
    Ok(schema::normalize(&raw).table)
}

/// Reads every sheet of the workbook into a single loosely typed table.
///
/// Sheets are visited in workbook order; each row is tagged with the name of
/// its sheet. Any format calamine can detect is accepted.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let not_openable = |source| ToolError::FileNotOpenable {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(not_openable)?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

    let mut raw = RawTable::default();
    for sheet_name in &sheet_names {
        let range = match workbook.worksheet_range(sheet_name) {
            Some(range) => range.map_err(not_openable)?,
            None => continue,
        };
        let before = raw.rows.len();
        ingest_sheet(&mut raw, sheet_name, &range);
        debug!(
            sheet = %sheet_name,
            row_count = raw.rows.len() - before,
            "sheet ingested"
        );
    }

    info!(
        sheet_count = sheet_names.len(),
        row_count = raw.rows.len(),
        column_count = raw.columns.len(),
        "workbook loaded"
    );
    Ok(raw)
}

/// Appends the rows of one sheet to `raw`. The first row is the header.
pub fn ingest_sheet(raw: &mut RawTable, sheet_name: &str, range: &Range<DataType>) {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(first_row) => header_names(first_row),
        None => return,
    };
    let indices: Vec<usize> = headers.iter().map(|name| raw.column_index(name)).collect();

    for row in rows {
        if row.iter().all(is_blank) {
            continue;
        }
        let mut values = vec![String::new(); raw.columns.len()];
        for (cell, &index) in row.iter().zip(&indices) {
            values[index] = cell_to_string(Some(cell));
        }
        raw.rows.push(RawRow {
            category: sheet_name.to_string(),
            values,
        });
    }

    // Earlier rows predate columns introduced by this sheet.
    let width = raw.columns.len();
    for row in &mut raw.rows {
        row.values.resize(width, String::new());
    }
}

/// Derives column names from a header row. Blank headers become
/// `Unnamed: <index>` and repeats get a `.N` suffix.
fn header_names(row: &[DataType]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = cell_to_string(Some(cell));
            let name = if name.trim().is_empty() {
                format!("Unnamed: {index}")
            } else {
                name
            };
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(value) => value.is_empty(),
        _ => false,
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(cell @ DataType::DateTime(_)) => cell
            .as_datetime()
            .map(|datetime| datetime.to_string())
            .unwrap_or_else(|| cell.to_string()),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
