//! Locating the pieces of a component document.
//!
//! A document is a front matter block followed by a Markdown body. The body
//! carries a top-level `API` heading whose subsections (`Attributes`,
//! `Events`, `Slots`, `Exposes`) hold the metadata tables.
//!
//! Section lookup is two-stage: the outer block is isolated first and the
//! inner heading is searched only inside it, so an `Events` heading elsewhere
//! in the page never matches.

use std::collections::BTreeMap;

use tree_sitter::{Node, Parser};

use crate::{Error, Result};

/// Front matter key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Value for `key`, if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Number of parsed keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the document had no front matter keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split a document into its front matter and body.
///
/// A document without a leading `---` line has empty front matter and the
/// whole text as body. An opening delimiter without a closing one is an error.
pub fn parse_front_matter(document: &str) -> Result<(FrontMatter, &str)> {
    let text = document.trim_start_matches('\u{feff}');
    let Some(after_open) = strip_delimiter_line(text) else {
        return Ok((FrontMatter::default(), text));
    };

    let mut fields = BTreeMap::new();
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        offset += line.len();
        let trimmed = line.trim();
        if trimmed == "---" {
            return Ok((FrontMatter { fields }, &after_open[offset..]));
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once(':') {
            fields.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
    }

    Err(Error::Parse("front matter is not terminated by '---'".to_string()))
}

fn strip_delimiter_line(text: &str) -> Option<&str> {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    (first.trim() == "---").then_some(rest)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// A heading located by the Markdown parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Heading<'a> {
    level: usize,
    text: &'a str,
    /// Byte offset of the line the heading starts on.
    start: usize,
    /// Byte offset of the first line after the heading.
    body_start: usize,
}

/// ATX and setext headings of `text` in document order.
///
/// Code blocks, fenced or indented, never yield headings.
fn headings(text: &str) -> Result<Vec<Heading<'_>>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_md::LANGUAGE.into())
        .map_err(|e| Error::Parse(format!("Failed to set language: {e}")))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| Error::Parse("Failed to parse markdown".into()))?;

    let mut found = Vec::new();
    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        if let Some(level) = heading_level(node) {
            found.push(Heading {
                level,
                text: heading_text(node, text),
                start: line_start(text, node.start_byte()),
                body_start: next_line_start(text, node.end_byte()),
            });
        } else if cursor.goto_first_child() {
            continue;
        }

        if cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return Ok(found);
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

fn heading_level(node: Node<'_>) -> Option<usize> {
    if !matches!(node.kind(), "atx_heading" | "setext_heading") {
        return None;
    }
    let level = node
        .children(&mut node.walk())
        .find_map(|child| match child.kind() {
            "atx_h1_marker" | "setext_h1_underline" => Some(1),
            "atx_h2_marker" | "setext_h2_underline" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        });
    Some(level.unwrap_or(1))
}

fn heading_text<'a>(node: Node<'_>, text: &'a str) -> &'a str {
    let raw = node.child_by_field_name("heading_content").map_or_else(
        || {
            text[node.byte_range()]
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start()
                .trim_start_matches('#')
        },
        |content| &text[content.byte_range()],
    );

    let mut cleaned = raw.trim();
    if let Some(without_anchor) = cleaned
        .strip_suffix('}')
        .and_then(|t| t.rfind("{#").map(|idx| &t[..idx]))
    {
        cleaned = without_anchor.trim_end();
    }
    cleaned.trim_end_matches('#').trim_end()
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |idx| idx + 1)
}

fn next_line_start(text: &str, offset: usize) -> usize {
    if offset == 0 || text[..offset].ends_with('\n') {
        return offset;
    }
    text[offset..]
        .find('\n')
        .map_or(text.len(), |idx| offset + idx + 1)
}

/// Text under the first heading named `name`, up to the next heading of the
/// same or higher level.
///
/// `Ok(None)` when no heading matches.
pub fn extract_block(text: &str, name: &str) -> Result<Option<String>> {
    let found = headings(text)?;
    let wanted = name.trim();

    let Some(position) = found.iter().position(|h| h.text.eq_ignore_ascii_case(wanted)) else {
        return Ok(None);
    };
    let heading = found[position];

    let end = found[position + 1..]
        .iter()
        .find(|h| h.level <= heading.level)
        .map_or(text.len(), |h| h.start);

    let block = text.get(heading.body_start..end).unwrap_or_default();
    Ok(Some(block.trim_end_matches(['\n', '\r']).to_string()))
}

/// Raw text of subsection `inner` inside the `outer` block of `document`.
///
/// Empty when either heading is absent.
pub fn extract_section(document: &str, outer: &str, inner: &str) -> Result<String> {
    let Some(block) = extract_block(document, outer)? else {
        return Ok(String::new());
    };
    Ok(extract_block(&block, inner)?.unwrap_or_default())
}

/// Intro prose of a body: the text after the title heading and before the
/// first subheading. `None` when there is no such text.
pub fn intro_text(body: &str) -> Result<Option<String>> {
    let found = headings(body)?;

    let stop = found
        .iter()
        .find(|h| h.level != 1)
        .map_or(body.len(), |h| h.start);
    let start = found
        .iter()
        .take_while(|h| h.level == 1)
        .last()
        .map_or(0, |h| h.body_start);

    let intro = body.get(start..stop).unwrap_or_default().trim();
    Ok((!intro.is_empty()).then(|| intro.to_string()))
}
