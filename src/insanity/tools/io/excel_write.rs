use std::path::Path;

use rust_xlsxwriter::{Table, TableColumn, Workbook, XlsxError};
use tracing::{info, instrument};

use crate::insanity::tools::error::{Result, ToolError};
use crate::insanity::tools::model::{CANONICAL_COLUMNS, Row};

/// Name of the single sheet written by [`write_items`].
pub const ITEMS_SHEET: &str = "Items";
/// Export target used when no output path is configured.
pub const DEFAULT_OUTPUT: &str = "insane_workbook.xlsx";

/// Writes `rows` to a fresh single-sheet workbook at `path`, replacing any
/// existing file, and returns the number of data rows written.
#[instrument(level = "info", skip(rows), fields(output = %path.display(), row_count = rows.len()))]
pub fn write_items(path: &Path, rows: &[Row]) -> Result<usize> {
    build_and_save(path, rows).map_err(|source| ToolError::ExportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("selection exported");
    Ok(rows.len())
}

fn build_and_save(path: &Path, rows: &[Row]) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(ITEMS_SHEET)?;

    for (col_idx, header) in CANONICAL_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.cells().iter().enumerate() {
            // Missing values stay blank cells.
            if !cell.is_empty() {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, *cell)?;
            }
        }
    }

    if !rows.is_empty() {
        let columns: Vec<TableColumn> = CANONICAL_COLUMNS
            .iter()
            .map(|header| TableColumn::new().set_header(*header))
            .collect();
        let mut table = Table::new();
        table.set_autofilter(true).set_columns(&columns);
        let col_end = (CANONICAL_COLUMNS.len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, rows.len() as u32, col_end, &table)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reports_exported_row_count() {
        let temp_dir = tempdir().expect("temporary directory");
        let path = temp_dir.path().join("out.xlsx");
        let rows = vec![
            Row::new("Fruit", "", "", "Apple", "A"),
            Row::new("Fruit", "", "", "Pear", "B"),
        ];

        assert_eq!(write_items(&path, &rows).expect("export"), 2);
        assert!(path.exists());
    }

    #[test]
    fn empty_selection_still_writes_header() {
        let temp_dir = tempdir().expect("temporary directory");
        let path = temp_dir.path().join("empty.xlsx");

        assert_eq!(write_items(&path, &[]).expect("export"), 0);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let temp_dir = tempdir().expect("temporary directory");
        let path = temp_dir.path().join("missing").join("out.xlsx");

        let error = write_items(&path, &[]).expect_err("directory does not exist");
        assert!(matches!(error, ToolError::ExportWrite { .. }));
        assert!(!error.is_fatal());
    }
}
