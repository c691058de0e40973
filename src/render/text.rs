//! Plain-text report.
//!
//! Per file: a `----` line and the file header, then one `----<name>`
//! section per function, then a `Function list` of one-line summaries.

use crate::error::Result;
use crate::model::DoxygenTable;
use crate::render::report;
use crate::render::{Renderer, ReportOptions};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, table: &DoxygenTable, opts: &ReportOptions) -> Result<String> {
        let mut out = String::new();
        for (file, entry) in table.files() {
            out.push_str("----\n");
            out.push_str(&report::file_header(
                table,
                file,
                &opts.file_tags,
                opts.include_empty,
                opts.header,
            ));

            if entry.function.is_empty() {
                continue;
            }

            for function in entry.functions() {
                out.push_str(&format!("----{}\n", function));
                out.push_str(&report::function_header(
                    table,
                    file,
                    function,
                    &opts.function_tags,
                    opts.include_empty,
                    opts.header,
                ));
            }

            out.push_str("\nFunction list\n");
            for function in entry.functions() {
                out.push_str(" * - ");
                out.push_str(&report::function_oneliner(
                    table,
                    file,
                    function,
                    &opts.summary_tags,
                    &opts.separator,
                    opts.summary,
                ));
            }
        }
        Ok(out)
    }
}
