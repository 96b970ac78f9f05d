//! Command parsing and reply rendering for the interactive session.
//!
//! Nothing here touches the terminal: [`dispatch`] turns a parsed
//! [`Command`] into a [`Reply`] that the REPL prints or acts upon.

use crate::insanity::tools::model::{Row, Table};
use crate::insanity::tools::query::ItemFilter;

pub const LIST_KEYWORD: &str = "insanity";
pub const EXPORT_KEYWORD: &str = "fix the insanity";
pub const EXIT_KEYWORD: &str = "bye";
pub const HELP_KEYWORD: &str = "help";

pub const BANNER: &str = "--- Welcome to the Insanity CLI ---";
pub const USAGE: &str = "Type:\n  \
    insanity -> all main categories.\n  \
    <name> -> drill into a category, subcategory or sub-subcategory.\n  \
    fix the insanity -> select and export items to Excel.\n  \
    bye -> see you later.\n";
pub const UNKNOWN_HINT: &str =
    "Unknown command. Type 'insanity' or 'bye'. Your favorite command is 'fix the insanity'.\n";
pub const INTERRUPT_HINT: &str = "\nDetected Ctrl+C. Type 'bye' to exit gracefully.";
pub const FAREWELL: &str = "Goodbyes are never forever, but bye for now!";
pub const SELECTION_HINT: &str = "\nEnter a comma-separated list of categories, subcategories, or sub-subcategories to export items.";
pub const SELECTION_PROMPT: &str = "List: ";
pub const AFTER_EXPORT_HINT: &str = "Type 'bye' to exit or 'insanity' to continue browsing.\n";

/// A line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListCategories,
    Export,
    Exit,
    Help,
    Category(String),
    Subcategory(String),
    SubSubcategory(String),
    Unknown(String),
}

impl Command {
    /// Keywords are matched case-insensitively; names are matched exactly,
    /// category first, then subcategory, then sub-subcategory. `help` only
    /// applies when no name of that spelling exists.
    pub fn parse(line: &str, table: &Table) -> Self {
        let input = line.trim();
        let keyword = input.to_ascii_lowercase();
        match keyword.as_str() {
            EXIT_KEYWORD => return Command::Exit,
            LIST_KEYWORD => return Command::ListCategories,
            EXPORT_KEYWORD => return Command::Export,
            _ => {}
        }

        if table.is_category(input) {
            Command::Category(input.to_string())
        } else if table.is_subcategory(input) {
            Command::Subcategory(input.to_string())
        } else if table.is_sub_subcategory(input) {
            Command::SubSubcategory(input.to_string())
        } else if matches!(keyword.as_str(), HELP_KEYWORD | "?") {
            Command::Help
        } else {
            Command::Unknown(input.to_string())
        }
    }
}

/// What the REPL should do in response to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    PromptSelection,
    Exit,
}

pub fn dispatch(table: &Table, command: &Command) -> Reply {
    match command {
        Command::Exit => Reply::Exit,
        Command::Export => Reply::PromptSelection,
        Command::Help => Reply::Text(USAGE.to_string()),
        Command::ListCategories => Reply::Text(render_categories(table)),
        Command::Category(name) => Reply::Text(render_category(table, name)),
        Command::Subcategory(name) => Reply::Text(render_subcategory(table, name)),
        Command::SubSubcategory(name) => Reply::Text(render_items(
            &table.items(&ItemFilter::new().sub_subcategory(name.as_str())),
        )),
        Command::Unknown(_) => Reply::Text(UNKNOWN_HINT.to_string()),
    }
}

fn render_categories(table: &Table) -> String {
    format!(
        "\nMain Categories:\n{}\nType a main category name to see its subcategories.",
        render_list(&table.categories())
    )
}

fn render_category(table: &Table, category: &str) -> String {
    let subcategories = table.subcategories(category);
    if subcategories.is_empty() {
        return render_items(&table.items(&ItemFilter::new().category(category)));
    }
    format!(
        "\nSubcategories of {category}:\n{}\nType a subcategory name to see its sub-subcategories or items.",
        render_list(&subcategories)
    )
}

/// Sub-subcategories are looked up under the first category holding the
/// subcategory; items, when there are none, come from every category.
fn render_subcategory(table: &Table, subcategory: &str) -> String {
    let sub_subcategories = table
        .first_category_of(subcategory)
        .map(|category| table.sub_subcategories(category, subcategory))
        .unwrap_or_default();
    if sub_subcategories.is_empty() {
        return render_items(&table.items(&ItemFilter::new().subcategory(subcategory)));
    }
    format!(
        "\nSub-subcategories of {subcategory}:\n{}\nType a sub-subcategory name to see its items.",
        render_list(&sub_subcategories)
    )
}

fn render_list(names: &[String]) -> String {
    names.iter().map(|name| format!("- {name}\n")).collect()
}

fn render_items(rows: &[&Row]) -> String {
    rows.iter()
        .map(|row| format!("{} | {}", row.item, row.client))
        .collect::<Vec<_>>()
        .join("\n")
}
