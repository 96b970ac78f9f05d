use std::path::PathBuf;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::insanity::tools::error::{Result, ToolError};
use crate::insanity::tools::session::{Session, expand_path};
use crate::insanity::tools::shell::{
    AFTER_EXPORT_HINT, BANNER, FAREWELL, INTERRUPT_HINT, Reply, SELECTION_HINT,
    SELECTION_PROMPT, USAGE,
};

const PROMPT: &str = ">> ";
const PATH_PROMPT: &str =
    "Enter the path to your Excel file (e.g., ~/Desktop/dummy_categories.xlsx): ";

/// Line-oriented front end. The only place that reads stdin or writes
/// stdout.
pub struct Repl {
    editor: DefaultEditor,
}

impl Repl {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    pub fn greet(&self) {
        println!("\n{BANNER}\n");
    }

    /// Asks for the workbook path until one is entered.
    pub fn prompt_input_path(&mut self) -> Result<PathBuf> {
        loop {
            match self.editor.readline(PATH_PROMPT) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Ok(expand_path(&line)),
                Err(ReadlineError::Interrupted) => println!("{INTERRUPT_HINT}"),
                Err(ReadlineError::Eof) => return Err(ToolError::NoInputPath),
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Serves commands until `bye` or end of input.
    pub fn run(&mut self, session: &Session) -> Result<()> {
        println!("{USAGE}");
        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("{INTERRUPT_HINT}");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{FAREWELL}");
                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            };
            if !line.trim().is_empty() {
                self.editor.add_history_entry(line.as_str())?;
            }

            match session.handle(&line) {
                Reply::Text(text) => println!("{text}"),
                Reply::PromptSelection => self.export(session)?,
                Reply::Exit => {
                    println!("{FAREWELL}");
                    return Ok(());
                }
            }
        }
    }

    fn export(&mut self, session: &Session) -> Result<()> {
        println!("{SELECTION_HINT}");
        let input = match self.editor.readline(SELECTION_PROMPT) {
            Ok(input) => input,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("{INTERRUPT_HINT}");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        match session.export(&input) {
            Ok(report) => println!("{report}"),
            Err(error) if !error.is_fatal() => {
                warn!(%error, "export failed");
                println!("\nExport failed: {error}\n");
            }
            Err(error) => return Err(error),
        }
        println!("{AFTER_EXPORT_HINT}");
        Ok(())
    }
}
