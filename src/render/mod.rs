//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod report;
pub mod text;

use crate::error::{Error, Result};
use crate::model::DoxygenTable;
use report::FieldFormat;

pub const DEFAULT_FILE_TAGS: &str =
    "file|brief|details|todo|bug|warning|see|copyright|author|since|version";
pub const DEFAULT_FUNCTION_TAGS: &str =
    "fn|brief|details|example|todo|bug|warning|see|copyright|author|since";
pub const DEFAULT_SUMMARY_TAGS: &str = "Fn|Brief|since";
pub const DEFAULT_SEPARATOR: &str = " ; ";

/// Report layout shared by every renderer.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Print tags whose value is empty
    pub include_empty: bool,
    pub header: FieldFormat,
    pub summary: FieldFormat,
    /// Joins the fields of a one-line summary
    pub separator: String,
    pub file_tags: String,
    pub function_tags: String,
    /// First entry is the label slot
    pub summary_tags: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_empty: false,
            header: FieldFormat::HEADER,
            summary: FieldFormat::SUMMARY,
            separator: DEFAULT_SEPARATOR.to_string(),
            file_tags: DEFAULT_FILE_TAGS.to_string(),
            function_tags: DEFAULT_FUNCTION_TAGS.to_string(),
            summary_tags: DEFAULT_SUMMARY_TAGS.to_string(),
        }
    }
}

/// Trait for rendering a table into a specific output format.
pub trait Renderer {
    fn render(&self, table: &DoxygenTable, opts: &ReportOptions) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
