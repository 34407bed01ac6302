//! Type annotation normalization.
//!
//! Documentation cells describe types with a small micro-syntax: custom
//! brackets (`^[string]`), markers followed by code spans
//! (`` ^[Function]`(value: string) => void` ``), bare code spans, and `|` or
//! `/` separated alternatives where `\|` means a literal pipe.
//!
//! [`normalize_type`] applies an ordered rule table; the first rule whose
//! predicate matches produces the result. Later rules exist to catch what the
//! earlier ones leave alone, so the order is load-bearing.

use std::sync::LazyLock;

use regex::Regex;

use crate::table::ESCAPED_PIPE;
use crate::types::{MethodParameter, TypeInfo, TypeKind};

const PIPE_SENTINEL: &str = "\u{E001}";

#[allow(clippy::unwrap_used)]
static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\^\[function\]\s*`([^`]*)`").unwrap());

#[allow(clippy::unwrap_used)]
static OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\^\[object\]\s*`([^`]*)`").unwrap());

#[allow(clippy::unwrap_used)]
static ENUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\^\[enum\]\s*`([^`]*)`").unwrap());

#[allow(clippy::unwrap_used)]
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^\[([^\]]*)\]").unwrap());

#[allow(clippy::unwrap_used)]
static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());

#[allow(clippy::unwrap_used)]
static RESERVED_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\^\[(function|object|enum)\]").unwrap());

/// One entry of the normalization table.
#[derive(Clone, Copy)]
pub struct TypeRule {
    /// Short identifier, used in logs and tests.
    pub name: &'static str,
    /// Whether this rule applies to the trimmed annotation.
    pub matches: fn(&str) -> bool,
    /// Produce the normalized form. Only called when `matches` returned true.
    pub extract: fn(&str) -> TypeKind,
}

/// Normalization rules in precedence order.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "slash-alternatives",
        matches: has_top_level_slash,
        extract: extract_slash_alternatives,
    },
    TypeRule {
        name: "function",
        matches: |text| FUNCTION_RE.is_match(text),
        extract: extract_function,
    },
    TypeRule {
        name: "object",
        matches: |text| OBJECT_RE.is_match(text),
        extract: extract_object,
    },
    TypeRule {
        name: "enum",
        matches: |text| ENUM_RE.is_match(text),
        extract: extract_enum,
    },
    TypeRule {
        name: "custom-bracket",
        matches: |text| BRACKET_RE.is_match(text),
        extract: |text| capture_or_text(&BRACKET_RE, text, split_or_simple),
    },
    TypeRule {
        name: "code-span",
        matches: |text| CODE_SPAN_RE.is_match(text) && !RESERVED_MARKER_RE.is_match(text),
        extract: |text| capture_or_text(&CODE_SPAN_RE, text, split_or_simple),
    },
    TypeRule {
        name: "pipe-union",
        matches: has_unescaped_pipe,
        extract: |text| TypeKind::Union(split_union(text)),
    },
    TypeRule {
        name: "escaped-pipe",
        matches: |text| text.contains(ESCAPED_PIPE),
        extract: |text| TypeKind::Simple(unescape_pipes(text).trim().to_string()),
    },
    TypeRule {
        name: "plain",
        matches: |_| true,
        extract: strip_decoration,
    },
];

/// Normalize a raw type annotation.
pub fn normalize_type(raw: &str) -> TypeInfo {
    TypeInfo::new(raw, normalize_kind(raw))
}

/// Normalized form of `raw` without the surrounding [`TypeInfo`].
pub fn normalize_kind(raw: &str) -> TypeKind {
    let text = raw.trim();
    let rule = matching_rule(text);
    (rule.extract)(text)
}

/// The first rule in [`TYPE_RULES`] that applies to `text`.
pub fn matching_rule(text: &str) -> &'static TypeRule {
    let text = text.trim();
    TYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(text))
        .unwrap_or(&TYPE_RULES[TYPE_RULES.len() - 1])
}

fn has_top_level_slash(text: &str) -> bool {
    split_outside_code_spans(text, '/').len() > 1
}

fn extract_slash_alternatives(text: &str) -> TypeKind {
    let mut members = Vec::new();
    for part in split_outside_code_spans(text, '/') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match normalize_kind(part) {
            TypeKind::Simple(name) | TypeKind::Literal(name) => members.push(name),
            TypeKind::Union(names) => members.extend(names),
        }
    }

    if members.len() == 1 {
        TypeKind::Simple(members.remove(0))
    } else {
        TypeKind::Union(members)
    }
}

fn extract_function(text: &str) -> TypeKind {
    capture_or_text(&FUNCTION_RE, text, |signature| {
        let signature = unescape_pipes(signature);
        TypeKind::Literal(strip_outer_parens(signature.trim()).to_string())
    })
}

fn extract_object(text: &str) -> TypeKind {
    capture_or_text(&OBJECT_RE, text, |body| TypeKind::Literal(body.to_string()))
}

fn extract_enum(text: &str) -> TypeKind {
    capture_or_text(&ENUM_RE, text, |body| {
        TypeKind::Literal(unescape_pipes(body))
    })
}

fn capture_or_text(re: &Regex, text: &str, build: impl Fn(&str) -> TypeKind) -> TypeKind {
    let captured = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str());
    build(captured)
}

fn split_or_simple(text: &str) -> TypeKind {
    if has_unescaped_pipe(text) {
        TypeKind::Union(split_union(text))
    } else {
        TypeKind::Simple(unescape_pipes(text).trim().to_string())
    }
}

fn strip_decoration(text: &str) -> TypeKind {
    let stripped = text
        .strip_prefix("^[")
        .map_or(text, |rest| rest.strip_suffix(']').unwrap_or(rest));
    TypeKind::Simple(stripped.trim().to_string())
}

fn has_unescaped_pipe(text: &str) -> bool {
    text.replace(ESCAPED_PIPE, "").contains('|')
}

fn unescape_pipes(text: &str) -> String {
    text.replace(ESCAPED_PIPE, "|")
}

/// Split on unescaped `|`; members are trimmed and unescaped.
fn split_union(text: &str) -> Vec<String> {
    text.replace(ESCAPED_PIPE, PIPE_SENTINEL)
        .split('|')
        .map(|member| member.trim().replace(PIPE_SENTINEL, "|"))
        .collect()
}

/// Split on `delimiter` wherever it is not inside a back-tick code span.
fn split_outside_code_spans(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_span = false;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if ch == '`' {
            in_span = !in_span;
        } else if ch == delimiter && !in_span {
            parts.push(&text[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Remove one pair of parentheses when they enclose the whole text.
fn strip_outer_parens(text: &str) -> &str {
    if !(text.starts_with('(') && text.ends_with(')')) {
        return text;
    }
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && idx != text.len() - 1 {
                    return text;
                }
            },
            _ => {},
        }
    }
    text[1..text.len() - 1].trim()
}

/// Split a function signature `(a: A, b?: B) => R` into parameters and return type.
///
/// Returns `None` when `signature` does not start with a parameter list.
pub fn split_signature(signature: &str) -> Option<(Vec<MethodParameter>, Option<TypeInfo>)> {
    let signature = signature.trim();
    if !signature.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    let mut close = None;
    for (idx, ch) in signature.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            },
            _ => {},
        }
    }
    let close = close?;

    let parameters = split_top_level(&signature[1..close], ',')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|param| {
            let parts = split_top_level(param, ':');
            let (name, ty) = if parts.len() > 1 {
                let name = parts[0];
                (name.trim(), param[name.len() + 1..].trim())
            } else {
                (param, "")
            };
            MethodParameter {
                name: name.to_string(),
                type_info: if ty.is_empty() {
                    TypeInfo::new("", TypeKind::Simple("any".to_string()))
                } else {
                    normalize_type(ty)
                },
            }
        })
        .collect();

    let returns = signature[close + 1..]
        .trim()
        .strip_prefix("=>")
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(normalize_type);

    Some((parameters, returns))
}

/// Split on `delimiter` outside of (), <>, {} and [] nesting.
fn split_top_level(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut prev = '\0';
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' | '<' | '{' | '[' => depth += 1,
            // `=>` is an arrow, not a closing bracket
            '>' if prev == '=' => {},
            ')' | '>' | '}' | ']' => depth -= 1,
            c if c == delimiter && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            },
            _ => {},
        }
        prev = ch;
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn simple(s: &str) -> TypeKind {
        TypeKind::Simple(s.to_string())
    }

    fn union(items: &[&str]) -> TypeKind {
        TypeKind::Union(items.iter().map(ToString::to_string).collect())
    }

    fn literal(s: &str) -> TypeKind {
        TypeKind::Literal(s.to_string())
    }

    #[test]
    fn test_slash_alternatives_of_brackets() {
        assert_eq!(
            normalize_kind("^[string] / ^[number]"),
            union(&["string", "number"])
        );
    }

    #[test]
    fn test_slash_alternatives_resolve_code_spans() {
        assert_eq!(
            normalize_kind("^[string] / `Date` / ^[number]"),
            union(&["string", "Date", "number"])
        );
    }

    #[test]
    fn test_slash_inside_code_span_is_not_alternative() {
        assert_eq!(normalize_kind("`'a/b' | 'c'`"), union(&["'a/b'", "'c'"]));
        assert_eq!(normalize_kind("`'a/b' \\| 'c'`"), simple("'a/b' | 'c'"));
    }

    #[test]
    fn test_function_signature() {
        assert_eq!(
            normalize_kind("^[Function]`(value: string \\| number) => void`"),
            literal("(value: string | number) => void")
        );
    }

    #[test]
    fn test_function_signature_outer_parens_stripped() {
        assert_eq!(
            normalize_kind("^[Function]`((date: Date) => boolean)`"),
            literal("(date: Date) => boolean")
        );
    }

    #[test]
    fn test_object_body_verbatim() {
        assert_eq!(
            normalize_kind("^[object]`{ label: string, value: any }`"),
            literal("{ label: string, value: any }")
        );
    }

    #[test]
    fn test_enum_body_unescaped() {
        assert_eq!(
            normalize_kind("^[enum]`'large' \\| 'default' \\| 'small'`"),
            literal("'large' | 'default' | 'small'")
        );
    }

    #[test]
    fn test_custom_bracket() {
        assert_eq!(normalize_kind("^[boolean]"), simple("boolean"));
        assert_eq!(normalize_kind("^[string | number]"), union(&["string", "number"]));
        assert_eq!(normalize_kind("^[array]`string[]`"), simple("array"));
    }

    #[test]
    fn test_code_span() {
        assert_eq!(normalize_kind("`CSSProperties`"), simple("CSSProperties"));
        assert_eq!(
            normalize_kind("`'top' | 'bottom'`"),
            union(&["'top'", "'bottom'"])
        );
    }

    #[test]
    fn test_bare_pipes_and_escapes() {
        assert_eq!(normalize_kind("string | number"), union(&["string", "number"]));
        assert_eq!(normalize_kind("string \\| number"), simple("string | number"));
        assert_eq!(normalize_kind("  string  "), simple("string"));
        assert_eq!(normalize_kind("^[string"), simple("string"));
    }

    #[test]
    fn test_rule_precedence_names() {
        let cases = [
            ("^[a] / ^[b]", "slash-alternatives"),
            ("^[Function]`() => void`", "function"),
            ("^[object]`{}`", "object"),
            ("^[enum]`'a'`", "enum"),
            ("^[string]", "custom-bracket"),
            ("`x`", "code-span"),
            ("a | b", "pipe-union"),
            ("a \\| b", "escaped-pipe"),
            ("a", "plain"),
        ];

        for (input, expected) in cases {
            assert_eq!(matching_rule(input).name, expected, "input: {input}");
        }
    }

    #[test]
    fn test_normalize_type_keeps_raw() {
        let info = normalize_type("  ^[boolean] ");

        assert_eq!(info.raw, "  ^[boolean] ");
        assert_eq!(info.normalized, simple("boolean"));
    }

    #[test]
    fn test_split_signature() {
        let (params, returns) =
            split_signature("(options: { a: string, b: number }, force?: boolean) => Promise<void>")
                .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "options");
        assert_eq!(params[0].type_info.raw, "{ a: string, b: number }");
        assert_eq!(params[1].name, "force?");
        assert_eq!(params[1].type_info.normalized, simple("boolean"));
        assert_eq!(returns.unwrap().normalized, simple("Promise<void>"));
    }

    #[test]
    fn test_split_signature_arrow_params() {
        let (params, returns) = split_signature("(cb: (v: string) => void) => void").unwrap();

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].type_info.raw, "(v: string) => void");
        assert_eq!(returns.unwrap().display(), "void");
        assert!(split_signature("void").is_none());
    }

    proptest! {
        #[test]
        fn test_escaped_pipes_never_split(
            words in prop::collection::vec("[a-z]{1,6}", 1..8),
            escaped in prop::collection::vec(any::<bool>(), 8),
        ) {
            let mut text = words[0].clone();
            let mut unescaped = 0;
            for (i, word) in words.iter().enumerate().skip(1) {
                if escaped[i] {
                    text.push_str(" \\| ");
                } else {
                    text.push_str(" | ");
                    unescaped += 1;
                }
                text.push_str(word);
            }

            match normalize_kind(&text) {
                TypeKind::Union(members) => prop_assert_eq!(members.len(), unescaped + 1),
                TypeKind::Simple(_) => prop_assert_eq!(unescaped, 0),
                TypeKind::Literal(_) => prop_assert!(false, "unexpected literal"),
            }
        }
    }
}
