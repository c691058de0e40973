//! Data model for extracted documentation — format-agnostic.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Recognized documentation tags. Anything else after an `@` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    File,
    Fn,
    Brief,
    Details,
    Example,
    Todo,
    Bug,
    Warning,
    See,
    Copyright,
    Author,
    Since,
    Version,
}

impl Tag {
    pub const ALL: [Tag; 13] = [
        Tag::File,
        Tag::Fn,
        Tag::Brief,
        Tag::Details,
        Tag::Example,
        Tag::Todo,
        Tag::Bug,
        Tag::Warning,
        Tag::See,
        Tag::Copyright,
        Tag::Author,
        Tag::Since,
        Tag::Version,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::File => "file",
            Tag::Fn => "fn",
            Tag::Brief => "brief",
            Tag::Details => "details",
            Tag::Example => "example",
            Tag::Todo => "todo",
            Tag::Bug => "bug",
            Tag::Warning => "warning",
            Tag::See => "see",
            Tag::Copyright => "copyright",
            Tag::Author => "author",
            Tag::Since => "since",
            Tag::Version => "version",
        }
    }

    /// Look up a tag by name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Tag> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag → every value recorded for it, in order of appearance.
pub type TagMap = IndexMap<Tag, Vec<String>>;

/// Everything extracted for one file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Tags from the `@file` block(s)
    pub header: TagMap,
    /// Function name → tags from its `@brief` block(s)
    pub function: IndexMap<String, TagMap>,
}

impl FileEntry {
    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.function.keys().map(String::as_str)
    }

    pub(crate) fn record_header(&mut self, tag: Tag, value: String) {
        self.header.entry(tag).or_default().push(value);
    }

    pub(crate) fn record_function(&mut self, name: &str, tag: Tag, value: String) {
        self.function
            .entry(name.to_string())
            .or_default()
            .entry(tag)
            .or_default()
            .push(value);
    }
}

/// Root of the extraction output, keyed by file identifier (stem of the path).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DoxygenTable {
    files: IndexMap<String, FileEntry>,
}

impl DoxygenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file(&self, key: &str) -> Option<&FileEntry> {
        self.files.get(key)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileEntry)> {
        self.files.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub(crate) fn entry(&mut self, key: &str) -> &mut FileEntry {
        self.files.entry(key.to_string()).or_default()
    }

    /// First value of a file-level tag, or `""` when anything along the way is missing.
    pub fn file_value(&self, file: &str, tag: &str) -> &str {
        self.file(file)
            .map(|entry| first_value(&entry.header, tag))
            .unwrap_or("")
    }

    /// First value of a function-level tag, or `""` when anything along the way is missing.
    pub fn function_value(&self, file: &str, function: &str, tag: &str) -> &str {
        self.file(file)
            .and_then(|entry| entry.function.get(function))
            .map(|tags| first_value(tags, tag))
            .unwrap_or("")
    }

    /// Drop every function entry whose name does not satisfy `keep`.
    pub fn retain_functions<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        for entry in self.files.values_mut() {
            entry.function.retain(|name, _| keep(name));
        }
    }
}

fn first_value<'a>(tags: &'a TagMap, name: &str) -> &'a str {
    Tag::parse(name)
        .and_then(|tag| tags.get(&tag))
        .and_then(|values| values.first())
        .map(String::as_str)
        .unwrap_or("")
}
