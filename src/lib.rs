//! Core library for the insanity command line application.
//!
//! A multi-sheet workbook is flattened into one table where every sheet
//! becomes a category. The modules keep responsibilities narrow: workbook IO
//! lives under [`insanity::tools::io`], the fixed-schema rows in
//! [`insanity::tools::model`], column discovery in [`insanity::tools::schema`],
//! hierarchical lookups in [`insanity::tools::query`], export selections in
//! [`insanity::tools::selection`], and the interactive front end in
//! [`insanity::tools::shell`] and [`insanity::tools::repl`].

pub mod insanity;

pub use insanity::tools::{
    Result, ToolError, error, io, model, query, repl, schema, selection, session, shell,
};
