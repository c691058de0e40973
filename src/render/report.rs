//! Field renderer — formats looked-up tag values as report lines.
//!
//! Tag lists are `|`-separated. Labels are printed as the caller spelled
//! them; lookups ignore case. Missing files, functions and tags render as
//! empty values and are suppressed unless `include_empty` is set.

use crate::model::DoxygenTable;

/// Column layout for a label: padded to `width`, truncated to `precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFormat {
    pub width: usize,
    pub precision: usize,
}

impl FieldFormat {
    pub const HEADER: FieldFormat = FieldFormat::new(10);
    pub const SUMMARY: FieldFormat = FieldFormat::new(20);

    pub const fn new(width: usize) -> Self {
        Self {
            width,
            precision: width,
        }
    }

    fn label(&self, text: &str) -> String {
        format!("{:<width$.prec$}", text, width = self.width, prec = self.precision)
    }
}

fn tag_list(tags: &str) -> impl Iterator<Item = &str> {
    tags.split('|')
}

fn field_line(out: &mut String, format: FieldFormat, tag: &str, value: &str) {
    out.push_str(&format!("{}: [{}]\n", format.label(tag), value));
}

/// One `tag: [value]` line per requested file-level tag.
pub fn file_header(
    table: &DoxygenTable,
    file: &str,
    tags: &str,
    include_empty: bool,
    format: FieldFormat,
) -> String {
    let mut out = String::new();
    for tag in tag_list(tags) {
        let value = table.file_value(file, tag);
        if !value.is_empty() || include_empty {
            field_line(&mut out, format, tag, value);
        }
    }
    out
}

/// One `tag: [value]` line per requested tag of a function.
pub fn function_header(
    table: &DoxygenTable,
    file: &str,
    function: &str,
    tags: &str,
    include_empty: bool,
    format: FieldFormat,
) -> String {
    let mut out = String::new();
    for tag in tag_list(tags) {
        let value = table.function_value(file, function, tag);
        if !value.is_empty() || include_empty {
            field_line(&mut out, format, tag, value);
        }
    }
    out
}

/// `name - value ; value` summary of a function.
///
/// The first entry of `tags` names the label column and is not looked up.
pub fn function_oneliner(
    table: &DoxygenTable,
    file: &str,
    function: &str,
    tags: &str,
    separator: &str,
    format: FieldFormat,
) -> String {
    let values: Vec<&str> = tag_list(tags)
        .skip(1)
        .map(|tag| table.function_value(file, function, tag))
        .collect();
    format!("{} - {}\n", format.label(function), values.join(separator))
}
