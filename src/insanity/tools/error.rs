use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while the
/// tool loads a workbook, serves the interactive session, or exports a
/// selection.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raised when the input workbook cannot be opened or one of its sheets
    /// cannot be parsed.
    #[error("cannot open workbook '{}': {source}", .path.display())]
    FileNotOpenable {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Raised when the user provides a path that does not exist. This is the
    /// missing-path half of [`ToolError::FileNotOpenable`] and is just as
    /// fatal.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when input ends before a workbook path was entered.
    #[error("no input path entered")]
    NoInputPath,

    /// Raised when the exported workbook cannot be built or saved.
    #[error("cannot write '{}': {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Raised when the line editor fails for reasons other than an
    /// interrupt or end of input.
    #[error("terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    /// Whether the error ends the session rather than a single command.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ToolError::ExportWrite { .. })
    }
}
