//! Best-effort discovery of the canonical columns in a loosely typed table.
//!
//! Header names in the source workbooks are free-form, so the rules below
//! match on lowercase names and substrings. A column that cannot be found is
//! not an error: the corresponding field is left empty for every row.

use tracing::{debug, warn};

use crate::insanity::tools::model::{
    CLIENT, ITEM, RawTable, Row, SUB_SUBCATEGORY, SUBCATEGORY, Table,
};

/// Header names accepted for the item column.
pub const ITEM_ALIASES: [&str; 2] = ["title", "item"];
/// Header names accepted for the client column.
pub const CLIENT_ALIASES: [&str; 2] = ["authors", "client"];

/// Index of each canonical column in [`RawTable::columns`], if found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub item: Option<usize>,
    pub client: Option<usize>,
    pub subcategory: Option<usize>,
    pub sub_subcategory: Option<usize>,
}

impl ColumnMapping {
    /// Applies the detection rules to `columns`.
    pub fn detect(columns: &[String]) -> Self {
        let lowered: Vec<String> = columns.iter().map(|name| name.to_lowercase()).collect();
        let find = |predicate: &dyn Fn(&str) -> bool| {
            lowered.iter().position(|name| predicate(name.as_str()))
        };

        let item = find(&|name| ITEM_ALIASES.contains(&name));
        let client = find(&|name| CLIENT_ALIASES.contains(&name));
        let subcategory = find(&is_subcategory_header)
            .or_else(|| find(&|name| name == SUBCATEGORY.to_lowercase()));
        let sub_subcategory = find(&|name| name.contains("sub-sub"))
            .or_else(|| find(&|name| name == SUB_SUBCATEGORY.to_lowercase()));

        // A column claimed by both levels belongs to the deeper one.
        let subcategory = subcategory.filter(|index| Some(*index) != sub_subcategory);

        Self {
            item,
            client,
            subcategory,
            sub_subcategory,
        }
    }

    /// Canonical labels whose source column could not be identified.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (ITEM, self.item),
            (CLIENT, self.client),
            (SUBCATEGORY, self.subcategory),
            (SUB_SUBCATEGORY, self.sub_subcategory),
        ]
        .into_iter()
        .filter(|(_, index)| index.is_none())
        .map(|(label, _)| label)
        .collect()
    }
}

/// A header names the subcategory level when it mentions `sub` anywhere but
/// not in its first `_`-separated token. This keeps `Sub-subcategory` style
/// headers out; a literal `Subcategory` column is picked up by the fallback.
fn is_subcategory_header(name: &str) -> bool {
    let first_token = name.split('_').next().unwrap_or("");
    name.contains("sub") && !first_token.contains("sub")
}

/// The fixed-schema table together with the mapping used to build it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub mapping: ColumnMapping,
    pub table: Table,
}

/// Detects the canonical columns of `raw` and projects every row onto them.
pub fn normalize(raw: &RawTable) -> Normalized {
    let mapping = ColumnMapping::detect(&raw.columns);
    for label in mapping.missing() {
        warn!(column = label, "column not found, treating it as empty");
    }
    debug!(?mapping, "column mapping detected");

    let table = raw
        .rows
        .iter()
        .map(|row| Row {
            category: row.category.clone(),
            subcategory: row.value(mapping.subcategory).to_string(),
            sub_subcategory: row.value(mapping.sub_subcategory).to_string(),
            item: row.value(mapping.item).to_string(),
            client: row.value(mapping.client).to_string(),
        })
        .collect();

    Normalized { mapping, table }
}
