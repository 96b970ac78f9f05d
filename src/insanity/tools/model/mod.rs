/// Canonical label of the column derived from the sheet name.
pub const CATEGORY: &str = "Category";
/// Canonical label of the second hierarchy level.
pub const SUBCATEGORY: &str = "Subcategory";
/// Canonical label of the third hierarchy level.
pub const SUB_SUBCATEGORY: &str = "Sub-subcategory";
/// Canonical label of the item name column.
pub const ITEM: &str = "Item";
/// Canonical label of the client/author column.
pub const CLIENT: &str = "Client";

/// Column order used by projections and exports.
pub const CANONICAL_COLUMNS: [&str; 5] = [CATEGORY, SUBCATEGORY, SUB_SUBCATEGORY, ITEM, CLIENT];

/// One record of the unified table.
///
/// Missing values are represented by empty strings; every query treats an
/// empty field as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub category: String,
    pub subcategory: String,
    pub sub_subcategory: String,
    pub item: String,
    pub client: String,
}

impl Row {
    /// Builds a row from its five canonical values.
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        sub_subcategory: impl Into<String>,
        item: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            sub_subcategory: sub_subcategory.into(),
            item: item.into(),
            client: client.into(),
        }
    }

    /// Returns the values in [`CANONICAL_COLUMNS`] order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.category,
            &self.subcategory,
            &self.sub_subcategory,
            &self.item,
            &self.client,
        ]
    }
}

/// The unified, immutable table built once at startup.
///
/// Row order is the concatenation order of the source sheets followed by the
/// original row order within each sheet. Duplicate rows are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Loosely typed table as read from the workbook, before column discovery.
///
/// `columns` is the union of every sheet's header in first-seen order. Each
/// row carries one value per column (empty when its sheet lacks the column)
/// plus the name of the sheet it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub category: String,
    pub values: Vec<String>,
}

impl RawTable {
    /// Returns the index of `name`, appending it to the column list when it
    /// has not been seen before.
    pub fn column_index(&mut self, name: &str) -> usize {
        match self.columns.iter().position(|column| column == name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        }
    }
}

impl RawRow {
    /// Value of `column`, empty when the column is unknown or the row is
    /// shorter than the header.
    pub fn value(&self, column: Option<usize>) -> &str {
        column
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }
}
