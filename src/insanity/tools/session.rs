use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::insanity::tools::error::{Result, ToolError};
use crate::insanity::tools::io::excel_read;
use crate::insanity::tools::io::excel_write::{self, DEFAULT_OUTPUT};
use crate::insanity::tools::model::Table;
use crate::insanity::tools::schema;
use crate::insanity::tools::selection;
use crate::insanity::tools::shell::{self, Command, Reply};

/// Runtime configuration gathered from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Workbook to browse. Prompted for when absent.
    pub input: Option<PathBuf>,
    /// Where selections are exported.
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Expands a leading `~` to the home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub exported: usize,
    pub unmatched: Vec<String>,
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\nExported {} items to '{}'\n",
            self.exported,
            self.path.display()
        )
    }
}

/// A loaded table plus the export target; everything the interactive loop
/// operates on.
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    output: PathBuf,
}

impl Session {
    pub fn new(table: Table, output: impl Into<PathBuf>) -> Self {
        Self {
            table,
            output: output.into(),
        }
    }

    /// Loads the workbook at `input`.
    #[instrument(level = "info", skip_all, fields(input = %input.display()))]
    pub fn open(input: &Path, output: impl Into<PathBuf>) -> Result<Self> {
        if !input.exists() {
            return Err(ToolError::MissingInput(input.to_path_buf()));
        }
        let raw = excel_read::read_raw_table(input)?;
        let normalized = schema::normalize(&raw);
        info!(
            row_count = normalized.table.len(),
            mapping = ?normalized.mapping,
            "table ready"
        );
        if normalized.table.is_empty() {
            warn!("workbook has no data rows");
        }
        Ok(Self::new(normalized.table, output))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Parses and dispatches one line of user input.
    pub fn handle(&self, line: &str) -> Reply {
        shell::dispatch(&self.table, &Command::parse(line, &self.table))
    }

    /// Resolves `input` and writes the matching rows to the output path.
    #[instrument(level = "info", skip(self), fields(output = %self.output.display()))]
    pub fn export(&self, input: &str) -> Result<ExportReport> {
        let selection = selection::resolve(&self.table, input);
        if selection.is_empty() {
            debug!("selection matched no rows, exporting header only");
        }
        let unmatched: Vec<String> = selection.unmatched().map(str::to_string).collect();
        let exported = excel_write::write_items(&self.output, &selection.rows)?;
        Ok(ExportReport {
            path: self.output.clone(),
            exported,
            unmatched,
        })
    }
}
