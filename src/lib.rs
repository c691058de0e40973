//! doxtract — pull Doxygen-style `/** ... */` headers out of source files
//! and report selected fields.
//!
//! ```no_run
//! use doxtract::{extract_file, ExtractOptions};
//! use doxtract::render::report::{file_header, FieldFormat};
//! use std::path::Path;
//!
//! let table = extract_file(Path::new("src/strings.c"), &ExtractOptions::default())?;
//! print!("{}", file_header(&table, "strings", "brief|author", false, FieldFormat::HEADER));
//! # Ok::<(), doxtract::Error>(())
//! ```

pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod scanner;

pub use error::{Error, Result};
pub use extract::{
    extract_file, extract_file_into, extract_str, extract_with, file_key, ExtractOptions,
    MissingFnPolicy,
};
pub use model::{DoxygenTable, FileEntry, Tag, TagMap};
