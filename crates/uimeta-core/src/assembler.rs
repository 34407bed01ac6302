//! One document in, one [`ComponentModel`] out.
//!
//! The assembler reads the front matter for identity, pulls the four API
//! subsections, parses each table and maps rows onto entities through ordered
//! header alias lists. Subsections that exist but hold no usable table are
//! recovered as empty lists.

use crate::config::ParseConfig;
use crate::defaults::coerce_default;
use crate::normalize::{normalize_type, split_signature};
use crate::section::{extract_section, intro_text, parse_front_matter};
use crate::table::{TableOptions, TableRow, parse_table};
use crate::types::{
    ComponentEvent, ComponentMethod, ComponentModel, ComponentProp, ComponentSlot, TypeInfo,
};
use crate::{Error, Result};

/// Accepted headers for the entity name column, in priority order.
pub const NAME_HEADERS: &[&str] = &["Name", "属性名", "名称", "事件名", "插槽名", "方法名", "参数"];
/// Accepted headers for the description column.
pub const DESCRIPTION_HEADERS: &[&str] = &["Description", "说明", "描述"];
/// Accepted headers for the type column.
pub const TYPE_HEADERS: &[&str] = &["Type", "类型", "回调参数", "作用域参数"];
/// Accepted headers for the default column.
pub const DEFAULT_HEADERS: &[&str] = &["Default", "默认值"];

/// Subsection holding the prop table.
pub const ATTRIBUTES: &str = "Attributes";
/// Subsection holding the event table.
pub const EVENTS: &str = "Events";
/// Subsection holding the slot table.
pub const SLOTS: &str = "Slots";
/// Subsection holding the exposed method table.
pub const EXPOSES: &str = "Exposes";

/// Assemble the model for the document at `slug`.
///
/// Fails when the front matter is unterminated or carries no `title`, or when
/// the Markdown parser cannot run.
pub fn assemble_component(slug: &str, document: &str, options: &ParseConfig) -> Result<ComponentModel> {
    let (front, body) = parse_front_matter(document)?;

    let title = front
        .get("title")
        .ok_or_else(|| Error::Parse(format!("{slug}: front matter has no title")))?;
    let name = title
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::Parse(format!("{slug}: title is blank")))?;
    let tag_name = tag_name_for(name, &options.component_prefix);

    let table_options = options.table_options();
    let api = options.api_heading.as_str();
    let rows = |section: &str| section_rows(body, api, section, &table_options, &tag_name);

    let mut model = ComponentModel::empty(tag_name.clone());
    model.description = front.get("description").map(ToString::to_string);
    model.detailed_description = intro_text(body)?;
    model.doc_url = options
        .doc_base_url
        .as_deref()
        .map(|base| format!("{}/{slug}", base.trim_end_matches('/')));

    for row in rows(ATTRIBUTES)? {
        if let Some(prop) = prop_from_row(&row) {
            upsert(&mut model.props, prop);
        }
    }
    for row in rows(EVENTS)? {
        if let Some(event) = event_from_row(&row) {
            upsert(&mut model.events, event);
        }
    }
    for row in rows(SLOTS)? {
        if let Some(slot) = slot_from_row(&row) {
            upsert(&mut model.slots, slot);
        }
    }
    for row in rows(EXPOSES)? {
        if let Some(method) = method_from_row(&row) {
            upsert(&mut model.methods, method);
        }
    }

    tracing::debug!(
        tag = %tag_name,
        props = model.props.len(),
        events = model.events.len(),
        slots = model.slots.len(),
        methods = model.methods.len(),
        "assembled component"
    );
    Ok(model)
}

/// Usable rows of one subsection.
fn section_rows(
    body: &str,
    api: &str,
    section: &str,
    table_options: &TableOptions,
    tag_name: &str,
) -> Result<Vec<TableRow>> {
    let raw = extract_section(body, api, section)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<TableRow> = parse_table(&raw, table_options)
        .into_iter()
        .filter(|row| !row.is_separator() && !is_repeated_header(row))
        .collect();

    if rows.is_empty() {
        let err = Error::MalformedSection {
            section: section.to_string(),
            reason: "no table rows".to_string(),
        };
        tracing::debug!(tag = %tag_name, error = %err, "section recovered as empty");
    }
    Ok(rows)
}

/// A body row that echoes the header label in its name column.
fn is_repeated_header(row: &TableRow) -> bool {
    row.get_any(NAME_HEADERS)
        .is_some_and(|(header, value)| value.trim().eq_ignore_ascii_case(header))
}

fn prop_from_row(row: &TableRow) -> Option<ComponentProp> {
    Some(ComponentProp {
        name: entity_name(row)?,
        description: cell(row, DESCRIPTION_HEADERS),
        type_info: type_cell(row),
        default: row
            .get_any(DEFAULT_HEADERS)
            .and_then(|(_, raw)| coerce_default(raw)),
    })
}

fn event_from_row(row: &TableRow) -> Option<ComponentEvent> {
    Some(ComponentEvent {
        name: entity_name(row)?,
        description: cell(row, DESCRIPTION_HEADERS),
        type_info: type_cell(row),
    })
}

fn slot_from_row(row: &TableRow) -> Option<ComponentSlot> {
    Some(ComponentSlot {
        name: entity_name(row)?,
        description: cell(row, DESCRIPTION_HEADERS),
        type_info: type_cell(row),
    })
}

fn method_from_row(row: &TableRow) -> Option<ComponentMethod> {
    let type_info = type_cell(row);
    let (parameters, returns) = split_signature(&type_info.display()).unwrap_or_default();

    Some(ComponentMethod {
        name: entity_name(row)?,
        description: cell(row, DESCRIPTION_HEADERS),
        type_info,
        parameters,
        returns,
    })
}

fn cell(row: &TableRow, aliases: &[&str]) -> Option<String> {
    row.get_any(aliases)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn type_cell(row: &TableRow) -> TypeInfo {
    normalize_type(row.get_any(TYPE_HEADERS).map_or("", |(_, raw)| raw))
}

/// Normalized entity name, or `None` when it comes out empty.
///
/// Back-ticks and `^[...]` badges are removed; of `a / b` alternatives the
/// first is kept.
fn entity_name(row: &TableRow) -> Option<String> {
    let (_, raw) = row.get_any(NAME_HEADERS)?;
    let cleaned = strip_badges(&raw.replace('`', ""));
    let first = cleaned.split('/').next().unwrap_or_default().trim();
    let name = kebab_case(first);
    (!name.is_empty()).then_some(name)
}

fn strip_badges(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("^[") {
        out.push_str(&rest[..start]);
        match rest[start..].find(']') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = "";
            },
        }
    }
    out.push_str(rest);
    out
}

/// Hyphenated lowercase form of an identifier.
///
/// `modelValue` → `model-value`, `DatePicker` → `date-picker`,
/// `XMLHttp` → `xml-http`. Existing hyphens, colons and digits are kept;
/// whitespace and underscores become hyphens.
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() || ch == '_' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }
        if ch.is_uppercase() {
            let prev = idx.checked_sub(1).map(|i| chars[i]);
            let next = chars.get(idx + 1).copied();
            let boundary = prev.is_some_and(|p| {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(char::is_lowercase))
            });
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out.trim_end_matches('-').to_string()
}

/// Tag name for component `name` under `prefix`, without doubling the prefix.
pub fn tag_name_for(name: &str, prefix: &str) -> String {
    let kebab = kebab_case(name);
    let prefix = prefix.trim().trim_end_matches('-');
    if prefix.is_empty() || kebab.starts_with(&format!("{prefix}-")) {
        kebab
    } else {
        format!("{prefix}-{kebab}")
    }
}

trait Named {
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($ty:ty),*) => {
        $(impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_named!(ComponentProp, ComponentEvent, ComponentSlot, ComponentMethod);

/// Insert `item`, replacing an existing entry of the same name in place.
fn upsert<T: Named>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.name() == item.name()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}
