pub mod error;
pub mod io;
pub mod model;
pub mod query;
pub mod repl;
pub mod schema;
pub mod selection;
pub mod session;
pub mod shell;

pub use error::{Result, ToolError};
