//! JSON renderer — the whole table, for tooling integration.
//!
//! Shape: `{ "<file>": { "header": { "<tag>": [..] }, "function": { "<name>": { .. } } } }`

use crate::error::Result;
use crate::model::DoxygenTable;
use crate::render::{Renderer, ReportOptions};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, table: &DoxygenTable, _opts: &ReportOptions) -> Result<String> {
        let mut out = serde_json::to_string_pretty(table)?;
        out.push('\n');
        Ok(out)
    }
}
