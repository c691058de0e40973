//! Comment extractor — builds a [`DoxygenTable`] from source text.
//!
//! A block holding `@file` describes the file itself; otherwise a block
//! holding `@brief` describes the function named by its `@fn` tag. Blocks
//! with neither are skipped.

use crate::error::{Error, Result};
use crate::model::{DoxygenTable, Tag};
use crate::scanner::{RawTag, RegexScanner, TagScanner};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

/// Default replacement for comment-continuation line breaks.
pub const DEFAULT_WRAP: &str = "\n\t";

/// Function key used for a function block that names no function.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

// newline(s), indentation and the leading `*` of a continuation line
static RE_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+[ \t]*\*[ \t]*").unwrap());

/// What to do with a function block that has no usable `@fn` tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MissingFnPolicy {
    /// Record it under [`UNKNOWN_FUNCTION`].
    #[default]
    Sentinel,
    /// Record it under the previous function block's name.
    CarryOver,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Joins the lines of a multi-line tag body.
    pub wrap: String,
    pub missing_fn: MissingFnPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            wrap: DEFAULT_WRAP.to_string(),
            missing_fn: MissingFnPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    FileHeader,
    FunctionHeader,
}

fn classify(fields: &[RawTag<'_>]) -> Option<BlockKind> {
    let has = |tag: Tag| fields.iter().any(|field| field.tag == tag);
    if has(Tag::File) {
        Some(BlockKind::FileHeader)
    } else if has(Tag::Brief) {
        Some(BlockKind::FunctionHeader)
    } else {
        None
    }
}

/// Table key for a path: the file name without directory or extension.
/// "src/util/strings.c" → "strings"
pub fn file_key(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Join the continuation lines of a tag body with `wrap`, then strip comment
/// borders from both ends.
///
/// A trailing continuation becomes a trailing `wrap`, so a non-blank `wrap`
/// can survive the trim: `"one\n * two\n * "` with `" ; "` gives `"one ; two ;"`.
pub fn clean_body(raw: &str, wrap: &str) -> String {
    RE_CONTINUATION
        .replace_all(raw, NoExpand(wrap))
        .trim_matches(is_border)
        .to_string()
}

fn is_border(c: char) -> bool {
    matches!(c, '*' | '/' | '\\') || c.is_whitespace()
}

/// Read and extract a single file.
pub fn extract_file(path: &Path, opts: &ExtractOptions) -> Result<DoxygenTable> {
    let mut table = DoxygenTable::new();
    extract_file_into(&mut table, path, opts)?;
    Ok(table)
}

/// Read a file and add its blocks to an existing table.
///
/// Files sharing a stem accumulate into the same entry.
pub fn extract_file_into(table: &mut DoxygenTable, path: &Path, opts: &ExtractOptions) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    extract_with(table, &file_key(path), &content, opts, &RegexScanner);
    Ok(())
}

/// Extract in-memory text under the given file key.
pub fn extract_str(key: &str, text: &str, opts: &ExtractOptions) -> DoxygenTable {
    let mut table = DoxygenTable::new();
    extract_with(&mut table, key, text, opts, &RegexScanner);
    table
}

/// Extract `text` into `table` under `key` using the given scanner.
pub fn extract_with<S: TagScanner>(
    table: &mut DoxygenTable,
    key: &str,
    text: &str,
    opts: &ExtractOptions,
    scanner: &S,
) {
    let blocks = scanner.blocks(text);
    debug!(file = key, blocks = blocks.len(), "scanned comment blocks");

    let mut previous_fn: Option<String> = None;
    for block in blocks {
        let fields = scanner.tags(block);
        match classify(&fields) {
            Some(BlockKind::FileHeader) => {
                let entry = table.entry(key);
                for field in &fields {
                    trace!(file = key, tag = %field.tag, "header tag");
                    entry.record_header(field.tag, clean_body(field.body, &opts.wrap));
                }
            }
            Some(BlockKind::FunctionHeader) => {
                let name = match function_name(&fields) {
                    Some(name) => name,
                    None => {
                        let fallback = match opts.missing_fn {
                            MissingFnPolicy::CarryOver => previous_fn.clone(),
                            MissingFnPolicy::Sentinel => None,
                        };
                        let name = fallback.unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());
                        warn!(file = key, function = %name, "function header without @fn");
                        name
                    }
                };
                debug!(file = key, function = %name, tags = fields.len(), "function header");
                let entry = table.entry(key);
                for field in &fields {
                    trace!(file = key, function = %name, tag = %field.tag, "function tag");
                    entry.record_function(&name, field.tag, clean_body(field.body, &opts.wrap));
                }
                previous_fn = Some(name);
            }
            None => {}
        }
    }
}

/// First word of the first non-empty `@fn` body.
fn function_name(fields: &[RawTag<'_>]) -> Option<String> {
    fields
        .iter()
        .filter(|field| field.tag == Tag::Fn)
        .find_map(|field| field.body.trim_matches(is_border).split_whitespace().next())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> DoxygenTable {
        extract_str("demo", text, &ExtractOptions::default())
    }

    #[test]
    fn no_blocks_gives_empty_table() {
        assert!(extract("int main(void) { return 0; }\n").is_empty());
    }

    #[test]
    fn file_header_brief() {
        let table = extract("/**\n * @file demo.c\n * @brief This is a brief.\n */\n");
        let entry = table.file("demo").unwrap();
        assert_eq!(entry.header[&Tag::Brief][0], "This is a brief.");
        assert_eq!(entry.header[&Tag::File][0], "demo.c");
        assert!(entry.function.is_empty());
    }

    #[test]
    fn function_key_is_first_word() {
        let table = extract("/**\n * @fn myFunction arg1 arg2\n * @brief desc\n */");
        let entry = table.file("demo").unwrap();
        let names: Vec<_> = entry.functions().collect();
        assert_eq!(names, ["myFunction"]);
        assert_eq!(table.function_value("demo", "myFunction", "brief"), "desc");
        assert_eq!(table.function_value("demo", "myFunction", "fn"), "myFunction arg1 arg2");
    }

    #[test]
    fn file_marker_wins_over_brief() {
        let table = extract("/** @file x.c @fn nope @brief both */");
        let entry = table.file("demo").unwrap();
        assert!(entry.function.is_empty());
        assert_eq!(entry.header[&Tag::Fn][0], "nope");
    }

    #[test]
    fn blocks_without_markers_are_ignored() {
        let table = extract("/** @author nobody */\n/** plain comment */");
        assert!(table.is_empty());
    }

    #[test]
    fn continuation_lines_use_wrap() {
        let text = "/**\n * @file f\n * @details line one\n *          line two\n * @since 1\n */";
        let opts = ExtractOptions {
            wrap: " | ".to_string(),
            ..Default::default()
        };
        let table = extract_str("demo", text, &opts);
        assert_eq!(table.file_value("demo", "details"), "line one | line two |");

        let table = extract(text);
        assert_eq!(table.file_value("demo", "details"), "line one\n\tline two");
    }

    #[test]
    fn empty_tags_are_recorded() {
        let table = extract("/**\n * @file f\n * @todo\n * @bug\n */");
        let entry = table.file("demo").unwrap();
        assert_eq!(entry.header[&Tag::Todo], [""]);
        assert_eq!(entry.header[&Tag::Bug], [""]);
    }

    #[test]
    fn repeated_tags_accumulate() {
        let table = extract("/** @file f @see one @see two */");
        let entry = table.file("demo").unwrap();
        assert_eq!(entry.header[&Tag::See], ["one", "two"]);
        assert_eq!(table.file_value("demo", "see"), "one");
    }

    #[test]
    fn missing_fn_uses_sentinel() {
        let text = "/** @fn first\n * @brief a */\n/** @brief orphan */";
        let table = extract(text);
        assert_eq!(table.function_value("demo", UNKNOWN_FUNCTION, "brief"), "orphan");
        assert_eq!(table.function_value("demo", "first", "brief"), "a");
    }

    #[test]
    fn missing_fn_can_carry_over() {
        let text = "/** @fn first\n * @brief a */\n/** @brief orphan */";
        let opts = ExtractOptions {
            missing_fn: MissingFnPolicy::CarryOver,
            ..Default::default()
        };
        let table = extract_str("demo", text, &opts);
        let entry = table.file("demo").unwrap();
        assert_eq!(entry.function.len(), 1);
        assert_eq!(entry.function["first"][&Tag::Brief], ["a", "orphan"]);
    }

    #[test]
    fn carry_over_without_previous_falls_back() {
        let opts = ExtractOptions {
            missing_fn: MissingFnPolicy::CarryOver,
            ..Default::default()
        };
        let table = extract_str("demo", "/** @brief orphan */", &opts);
        assert_eq!(table.function_value("demo", UNKNOWN_FUNCTION, "brief"), "orphan");
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "/** @file f\n * @brief b */\n/** @fn g\n * @brief h */";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn clean_body_joins_before_trimming() {
        let raw = "line one\n *          line two\n * ";
        assert_eq!(clean_body(raw, " ; "), "line one ; line two ;");
        assert_eq!(clean_body(raw, DEFAULT_WRAP), "line one\n\tline two");
    }

    #[test]
    fn empty_fn_tag_is_skipped_for_the_name() {
        let table = extract("/** @fn\n * @fn real\n * @brief b */");
        let names: Vec<_> = table.file("demo").unwrap().functions().collect();
        assert_eq!(names, ["real"]);
    }

    #[test]
    fn clean_body_strips_borders() {
        assert_eq!(clean_body("  value\n */", "\n\t"), "value");
        assert_eq!(clean_body("* /\\ ", "\n\t"), "");
    }

    #[test]
    fn key_is_file_stem() {
        assert_eq!(file_key(Path::new("src/util/strings.c")), "strings");
        assert_eq!(file_key(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = extract_file(Path::new("/nonexistent/nope.c"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().contains("nope.c"));
    }
}
