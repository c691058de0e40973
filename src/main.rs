//! doxtract — report Doxygen-style comment headers from source files.
//!
//! - **file mode**: `doxtract src/*.c include/util.h`
//! - **stdin mode**: `doxtract < file.c` (table key `stdin`)

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use doxtract::extract::{self, ExtractOptions, MissingFnPolicy, DEFAULT_WRAP};
use doxtract::render::report::FieldFormat;
use doxtract::render::{self, ReportOptions};
use doxtract::DoxygenTable;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

/// Table key used for text read from stdin.
const STDIN_KEY: &str = "stdin";

#[derive(Parser)]
#[command(
    name = "doxtract",
    about = "Extract Doxygen-style comment headers and print selected fields"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Also print tags with empty values (`-e`, `--empty`, `--empty=<bool>`)
    #[arg(
        short = 'e',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set
    )]
    empty: bool,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Joins continuation lines of a tag body. `\n` and `\t` are unescaped.
    #[arg(long, default_value = DEFAULT_WRAP, hide_default_value = true)]
    wrap: String,

    /// Width of the tag column
    #[arg(long, default_value_t = FieldFormat::HEADER.width)]
    width: usize,

    /// Maximum printed length of a tag label (defaults to --width)
    #[arg(long)]
    precision: Option<usize>,

    /// Width of the function name column in the function list
    #[arg(long, default_value_t = FieldFormat::SUMMARY.width)]
    summary_width: usize,

    /// Joins the fields of a function list entry
    #[arg(long, default_value = render::DEFAULT_SEPARATOR)]
    separator: String,

    /// File header tags, separated by '|'
    #[arg(long, default_value = render::DEFAULT_FILE_TAGS)]
    file_tags: String,

    /// Function header tags, separated by '|'
    #[arg(long, default_value = render::DEFAULT_FUNCTION_TAGS)]
    function_tags: String,

    /// Function list tags, separated by '|'. The first one is the name column.
    #[arg(long, default_value = render::DEFAULT_SUMMARY_TAGS)]
    summary_tags: String,

    /// Only report this function
    #[arg(long)]
    function: Option<String>,

    /// Key for a function header without @fn
    #[arg(long, value_enum, default_value_t = MissingFn::Sentinel)]
    missing_fn: MissingFn,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MissingFn {
    /// Record it under `<unknown>`
    Sentinel,
    /// Reuse the previous function's name
    CarryOver,
}

impl From<MissingFn> for MissingFnPolicy {
    fn from(value: MissingFn) -> Self {
        match value {
            MissingFn::Sentinel => MissingFnPolicy::Sentinel,
            MissingFn::CarryOver => MissingFnPolicy::CarryOver,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let extract_opts = ExtractOptions {
        wrap: unescape(&cli.wrap),
        missing_fn: cli.missing_fn.into(),
    };
    let report_opts = ReportOptions {
        include_empty: cli.empty,
        header: FieldFormat {
            width: cli.width,
            precision: cli.precision.unwrap_or(cli.width),
        },
        summary: FieldFormat::new(cli.summary_width),
        separator: cli.separator.clone(),
        file_tags: cli.file_tags.clone(),
        function_tags: cli.function_tags.clone(),
        summary_tags: cli.summary_tags.clone(),
    };
    // Fail on a bad --format before touching any input
    let renderer = render::create_renderer(&cli.format)?;

    let mut table = if cli.files.is_empty() {
        stdin_mode(&extract_opts)?
    } else {
        file_mode(&cli.files, &extract_opts)?
    };

    if let Some(ref only) = cli.function {
        table.retain_functions(|name| name == only.as_str());
    }

    print!("{}", renderer.render(&table, &report_opts)?);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

/// stdin mode: read everything from stdin and key it as `stdin`.
fn stdin_mode(opts: &ExtractOptions) -> Result<DoxygenTable> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(extract::extract_str(STDIN_KEY, &input, opts))
}

/// file mode: extract every input into one table, in command-line order.
fn file_mode(patterns: &[String], opts: &ExtractOptions) -> Result<DoxygenTable> {
    let mut table = DoxygenTable::new();
    for path in expand_inputs(patterns)? {
        info!(path = %path.display(), "extracting");
        extract::extract_file_into(&mut table, &path, opts)?;
    }
    Ok(table)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Resolve inputs to paths.
///
/// Existing files and plain paths are kept as given, so a missing file fails
/// on read. A `*`/`?` pattern that matches nothing only warns; a pattern with
/// nothing but `[...]` that matches nothing is read as a literal path.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() || !is_glob(pattern) {
            push_unique(&mut files, path.to_path_buf());
            continue;
        }
        let paths = match glob::glob(pattern) {
            Ok(paths) => paths,
            Err(_) if !has_wildcard(pattern) => {
                push_unique(&mut files, path.to_path_buf());
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("invalid glob pattern: {}", pattern));
            }
        };
        let mut matches: Vec<PathBuf> = paths
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            if has_wildcard(pattern) {
                warn!(pattern = pattern.as_str(), "no files matched");
            } else {
                push_unique(&mut files, path.to_path_buf());
            }
            continue;
        }
        // Sort for deterministic output
        matches.sort();
        for path in matches {
            push_unique(&mut files, path);
        }
    }
    Ok(files)
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

/// Turn `\n`, `\t` and `\\` typed on the command line into the real characters.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
