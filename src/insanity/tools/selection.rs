//! Resolution of a free-form, comma-separated selection into table rows.

use tracing::debug;

use crate::insanity::tools::model::{Row, Table};
use crate::insanity::tools::query::ItemFilter;

/// Hierarchy level a selection token matched, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Category,
    Subcategory,
    SubSubcategory,
    Unmatched,
}

/// Outcome for one token of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub token: String,
    pub resolution: Resolution,
    pub row_count: usize,
}

/// Rows picked by a selection, in token order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub rows: Vec<Row>,
    pub tokens: Vec<TokenMatch>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tokens that matched nothing.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|token| token.resolution == Resolution::Unmatched)
            .map(|token| token.token.as_str())
    }
}

/// Splits on commas, trims each token and drops empty ones. Order and
/// duplicates are kept.
pub fn parse_tokens(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolves one token against category, subcategory and sub-subcategory
/// names, stopping at the first level that knows it.
///
/// Subcategory and sub-subcategory matches are not scoped to a parent: a
/// name shared by several categories selects rows from all of them.
pub fn resolve_token<'a>(table: &'a Table, token: &str) -> (Resolution, Vec<&'a Row>) {
    if table.is_category(token) {
        return (
            Resolution::Category,
            table.items(&ItemFilter::new().category(token)),
        );
    }
    if table.is_subcategory(token) {
        return (
            Resolution::Subcategory,
            table.items(&ItemFilter::new().subcategory(token)),
        );
    }
    if table.is_sub_subcategory(token) {
        return (
            Resolution::SubSubcategory,
            table.items(&ItemFilter::new().sub_subcategory(token)),
        );
    }
    (Resolution::Unmatched, Vec::new())
}

/// Resolves every token of `input` and concatenates the matches.
pub fn resolve(table: &Table, input: &str) -> Selection {
    let mut selection = Selection::default();
    for token in parse_tokens(input) {
        let (resolution, rows) = resolve_token(table, &token);
        let row_count = rows.len();
        debug!(%token, ?resolution, row_count, "selection token resolved");
        selection.rows.extend(rows.into_iter().cloned());
        selection.tokens.push(TokenMatch {
            token,
            resolution,
            row_count,
        });
    }
    selection
}
