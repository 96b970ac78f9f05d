use std::collections::BTreeSet;

use crate::insanity::tools::model::{Row, Table};

/// Equality filters over the three hierarchy levels. Unset (or empty)
/// filters impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub sub_subcategory: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn sub_subcategory(mut self, sub_subcategory: impl Into<String>) -> Self {
        self.sub_subcategory = Some(sub_subcategory.into());
        self
    }

    /// Whether `row` satisfies every supplied filter.
    pub fn matches(&self, row: &Row) -> bool {
        fn accepts(filter: &Option<String>, value: &str) -> bool {
            match filter.as_deref() {
                None | Some("") => true,
                Some(expected) => expected == value,
            }
        }

        accepts(&self.category, &row.category)
            && accepts(&self.subcategory, &row.subcategory)
            && accepts(&self.sub_subcategory, &row.sub_subcategory)
    }
}

/// Hierarchical lookups. Every distinct set is sorted by plain byte order and
/// never contains the empty string.
impl Table {
    /// All categories, one per source sheet that contributed rows.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.rows().iter().map(|row| row.category.as_str()))
    }

    /// Subcategories present under `category`.
    pub fn subcategories(&self, category: &str) -> Vec<String> {
        distinct(
            self.rows()
                .iter()
                .filter(|row| row.category == category)
                .map(|row| row.subcategory.as_str()),
        )
    }

    /// Sub-subcategories present under `category` and `subcategory`.
    pub fn sub_subcategories(&self, category: &str, subcategory: &str) -> Vec<String> {
        distinct(
            self.rows()
                .iter()
                .filter(|row| row.category == category && row.subcategory == subcategory)
                .map(|row| row.sub_subcategory.as_str()),
        )
    }

    /// Rows matching `filter`, in table order.
    pub fn items(&self, filter: &ItemFilter) -> Vec<&Row> {
        self.rows().iter().filter(|row| filter.matches(row)).collect()
    }

    pub fn is_category(&self, name: &str) -> bool {
        !name.is_empty() && self.rows().iter().any(|row| row.category == name)
    }

    pub fn is_subcategory(&self, name: &str) -> bool {
        !name.is_empty() && self.rows().iter().any(|row| row.subcategory == name)
    }

    pub fn is_sub_subcategory(&self, name: &str) -> bool {
        !name.is_empty() && self.rows().iter().any(|row| row.sub_subcategory == name)
    }

    /// Category of the first row (in table order) carrying `subcategory`.
    pub fn first_category_of(&self, subcategory: &str) -> Option<&str> {
        self.rows()
            .iter()
            .find(|row| !subcategory.is_empty() && row.subcategory == subcategory)
            .map(|row| row.category.as_str())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
