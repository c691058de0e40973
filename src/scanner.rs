//! Comment scanning — isolates `/** ... */` blocks and splits them into
//! raw `@tag body` pairs.
//!
//! Body boundaries follow the Doxygen habit of ending a field at the next
//! `@word`, whether or not that word is a tag we keep:
//!
//! - `@` + lowercase letter always starts a new field (`@param`, `@return`)
//! - `@` + a recognized tag in any case, followed by whitespace, does too
//! - anything else (`user@Host.org`) stays part of the body

use crate::model::Tag;
use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@([A-Za-z]\w*)").unwrap());

/// A recognized tag and its body, exactly as it appears in the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    pub tag: Tag,
    pub body: &'a str,
}

/// Splits source text into comment blocks and blocks into tag fields.
pub trait TagScanner {
    /// Documentation blocks in order of appearance, delimiters included.
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Recognized tags in order of appearance, bodies uncleaned.
    fn tags<'a>(&self, block: &'a str) -> Vec<RawTag<'a>>;
}

/// Regex-backed scanner.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexScanner;

struct Token {
    start: usize,
    end: usize,
    tag: Option<Tag>,
}

impl TagScanner for RegexScanner {
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        RE_BLOCK.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn tags<'a>(&self, block: &'a str) -> Vec<RawTag<'a>> {
        let mut tokens: Vec<Token> = Vec::new();
        for caps in RE_TOKEN.captures_iter(block) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let followed_by_space = block[whole.end()..].starts_with(char::is_whitespace);
            let tag = Tag::parse(name.as_str()).filter(|_| followed_by_space);
            let lowercase = name.as_str().starts_with(|c: char| c.is_ascii_lowercase());
            if tag.is_some() || lowercase {
                tokens.push(Token {
                    start: whole.start(),
                    end: whole.end(),
                    tag,
                });
            }
        }

        let mut fields = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(tag) = token.tag else { continue };
            let stop = tokens.get(i + 1).map_or(block.len(), |next| next.start);
            fields.push(RawTag {
                tag,
                body: block[token.end..stop].trim_start(),
            });
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(block: &str) -> Vec<(Tag, &str)> {
        RegexScanner
            .tags(block)
            .into_iter()
            .map(|raw| (raw.tag, raw.body))
            .collect()
    }

    #[test]
    fn blocks_are_shortest_matches_in_order() {
        let text = "/** one */ int x; /* plain */ /**\n * two\n */";
        assert_eq!(RegexScanner.blocks(text), ["/** one */", "/**\n * two\n */"]);
    }

    #[test]
    fn no_blocks_in_plain_code() {
        assert!(RegexScanner.blocks("int main() { return 0; } // @brief").is_empty());
    }

    #[test]
    fn unterminated_block_is_skipped() {
        assert!(RegexScanner.blocks("/** @brief never closed").is_empty());
    }

    #[test]
    fn body_ends_at_unrecognized_tag() {
        let found = tags("/** @brief Adds\n * @param a left\n * @return sum */");
        assert_eq!(found, [(Tag::Brief, "Adds\n * ")]);
    }

    #[test]
    fn body_ends_at_next_recognized_tag() {
        let found = tags("/** @brief short@since 1.0 */");
        assert_eq!(found, [(Tag::Brief, "short"), (Tag::Since, "1.0 */")]);
    }

    #[test]
    fn uppercase_at_inside_body_is_kept() {
        let found = tags("/** @author Jane <jane@Roe.org> */");
        assert_eq!(found, [(Tag::Author, "Jane <jane@Roe.org> */")]);
    }

    #[test]
    fn tag_names_ignore_case() {
        let found = tags("/** @Brief Mixed @VERSION 2 */");
        assert_eq!(found, [(Tag::Brief, "Mixed "), (Tag::Version, "2 */")]);
    }

    #[test]
    fn tag_needs_trailing_whitespace() {
        // `@examples` is not `@example`, but still ends the brief.
        let found = tags("/** @brief text @examples see file */");
        assert_eq!(found, [(Tag::Brief, "text ")]);
    }

    #[test]
    fn empty_body_is_kept() {
        let found = tags("/** @todo\n * @bug\n */");
        assert_eq!(found, [(Tag::Todo, "* "), (Tag::Bug, "*/")]);
    }
}
