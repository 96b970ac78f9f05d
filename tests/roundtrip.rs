use std::fs;
use std::path::Path;

use insanity_tools::io::excel_read;
use insanity_tools::io::excel_write::{self, ITEMS_SHEET};
use insanity_tools::model::{Row, Table};
use insanity_tools::query::ItemFilter;
use insanity_tools::selection;
use insanity_tools::session::Session;
use insanity_tools::shell::Reply;
use insanity_tools::ToolError;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

/// Writes a workbook with one sheet per `(name, rows)` pair; the first row of
/// each sheet is its header.
fn write_fixture(path: &Path, sheets: &[(&str, &[&[&str]])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet named");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet
                        .write_string(row_idx as u32, col_idx as u16, *cell)
                        .expect("cell written");
                }
            }
        }
    }
    workbook.save(path).expect("fixture saved");
}

fn groceries(path: &Path) {
    write_fixture(
        path,
        &[
            (
                "Fruit",
                &[&["Title", "Authors"], &["Apple", "A"], &["Pear", "B"]],
            ),
            ("Veg", &[&["Title", "Authors"], &["Carrot", "C"]]),
        ],
    );
}

#[test]
fn sheets_become_categories() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("groceries.xlsx");
    groceries(&input);

    let table = excel_read::read_table(&input).expect("workbook loaded");

    assert_eq!(table.len(), 3);
    assert_eq!(table.categories(), vec!["Fruit", "Veg"]);
    assert_eq!(
        table.rows(),
        &[
            Row::new("Fruit", "", "", "Apple", "A"),
            Row::new("Fruit", "", "", "Pear", "B"),
            Row::new("Veg", "", "", "Carrot", "C"),
        ]
    );
}

#[test]
fn hierarchy_columns_are_discovered() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("library.xlsx");
    write_fixture(
        &input,
        &[
            (
                "Books",
                &[
                    &["Item", "Client", "Subcategory", "Sub-subcategory", "Notes"],
                    &["Dune", "Herbert", "Fiction", "Sci-Fi", "classic"],
                    &["Emma", "Austen", "Fiction", "", ""],
                    &["Walden", "Thoreau", "Essays", "", ""],
                ],
            ),
            (
                "Films",
                &[
                    &["Item", "Client", "Subcategory"],
                    &["Metropolis", "Lang", "Silent"],
                ],
            ),
        ],
    );

    let table = excel_read::read_table(&input).expect("workbook loaded");

    assert_eq!(table.subcategories("Books"), vec!["Essays", "Fiction"]);
    assert_eq!(table.sub_subcategories("Books", "Fiction"), vec!["Sci-Fi"]);
    assert_eq!(table.subcategories("Films"), vec!["Silent"]);
    let silent = table.items(&ItemFilter::new().subcategory("Silent"));
    assert_eq!(silent, vec![&Row::new("Films", "Silent", "", "Metropolis", "Lang")]);
}

#[test]
fn selection_exports_and_reloads() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("groceries.xlsx");
    let output = temp_dir.path().join("selection.xlsx");
    groceries(&input);

    let session = Session::open(&input, &output).expect("session opened");
    let report = session.export(" Fruit ,  Nonexistent ").expect("exported");
    assert_eq!(report.exported, 2);
    assert_eq!(report.unmatched, vec!["Nonexistent"]);

    let reloaded = excel_read::read_table(&output).expect("export reloaded");
    assert_eq!(reloaded.categories(), vec![ITEMS_SHEET]);

    let selected = selection::resolve(session.table(), "Fruit");
    assert_eq!(selected.len(), reloaded.len());
    for (original, restored) in selected.rows.iter().zip(reloaded.rows()) {
        assert_eq!(restored.category, ITEMS_SHEET);
        assert_eq!(original.subcategory, restored.subcategory);
        assert_eq!(original.sub_subcategory, restored.sub_subcategory);
        assert_eq!(original.item, restored.item);
        assert_eq!(original.client, restored.client);
    }
}

#[test]
fn exported_header_is_fixed() {
    let temp_dir = tempdir().expect("temporary directory");
    let output = temp_dir.path().join("items.xlsx");
    let rows = vec![Row::new("Books", "Fiction", "Sci-Fi", "Dune", "Herbert")];

    excel_write::write_items(&output, &rows).expect("exported");
    let raw = excel_read::read_raw_table(&output).expect("export reloaded");

    assert_eq!(
        raw.columns,
        vec!["Category", "Subcategory", "Sub-subcategory", "Item", "Client"]
    );
    assert_eq!(raw.rows[0].category, ITEMS_SHEET);
    assert_eq!(raw.rows[0].values[1..], ["Fiction", "Sci-Fi", "Dune", "Herbert"]);
}

#[test]
fn repeated_export_has_identical_structure() {
    let temp_dir = tempdir().expect("temporary directory");
    let output = temp_dir.path().join("twice.xlsx");
    let table = Table::new(vec![
        Row::new("Fruit", "Pome", "", "Apple", "A"),
        Row::new("Veg", "", "", "Carrot", ""),
    ]);
    let selected = selection::resolve(&table, "Fruit, Veg");

    excel_write::write_items(&output, &selected.rows).expect("first export");
    let first = excel_read::read_raw_table(&output).expect("first reload");
    excel_write::write_items(&output, &selected.rows).expect("second export");
    let second = excel_read::read_raw_table(&output).expect("second reload");

    assert_eq!(first, second);
}

#[test]
fn shell_drills_into_loaded_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("groceries.xlsx");
    groceries(&input);

    let session = Session::open(&input, temp_dir.path().join("out.xlsx")).expect("opened");

    assert_eq!(
        session.handle("Fruit"),
        Reply::Text("Apple | A\nPear | B".into())
    );
    assert_eq!(session.handle("fix the insanity"), Reply::PromptSelection);
    assert_eq!(session.handle("BYE"), Reply::Exit);
}

#[test]
fn unreadable_workbook_is_not_openable() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("broken.xlsx");
    fs::write(&input, "not a workbook").expect("garbage written");

    let error = Session::open(&input, "out.xlsx").expect_err("garbage rejected");
    assert!(matches!(error, ToolError::FileNotOpenable { .. }));
    assert!(error.is_fatal());
}
