//! Core data model: component metadata records and the corpus that holds them.
//!
//! Everything here is plain data. Models are produced once per batch by the
//! [`CorpusBuilder`](crate::CorpusBuilder), serialized with camelCase keys and
//! never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical form of a type annotation.
///
/// Serialized adjacently tagged: `{"kind": "union", "value": ["string", "number"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TypeKind {
    /// A single type name such as `string`.
    Simple(String),
    /// Ordered alternatives, as written in the docs.
    Union(Vec<String>),
    /// Verbatim payload of a function signature, object shape or enum list.
    Literal(String),
}

/// A type annotation as written plus its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Original annotation text from the table cell.
    pub raw: String,
    /// Result of [`normalize_type`](crate::normalize_type).
    pub normalized: TypeKind,
}

impl TypeInfo {
    /// Build a `TypeInfo` from its parts.
    pub fn new(raw: impl Into<String>, normalized: TypeKind) -> Self {
        Self {
            raw: raw.into(),
            normalized,
        }
    }

    /// Render the normalized form as a single TypeScript-like string.
    ///
    /// Unions are joined with ` | `.
    pub fn display(&self) -> String {
        match &self.normalized {
            TypeKind::Simple(name) | TypeKind::Literal(name) => name.clone(),
            TypeKind::Union(members) => members.join(" | "),
        }
    }

    /// True when the normalized form is the simple type `name` (ASCII case-insensitive).
    pub fn is_simple(&self, name: &str) -> bool {
        matches!(&self.normalized, TypeKind::Simple(simple) if simple.eq_ignore_ascii_case(name))
    }

    /// True when the normalized form is a function signature literal.
    pub fn is_function(&self) -> bool {
        matches!(&self.normalized, TypeKind::Literal(text) if text.contains("=>"))
    }
}

/// A documented component property (attribute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProp {
    /// Hyphenated lowercase name.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    /// Default value with one layer of quoting removed; absent for `—`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A documented component event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEvent {
    /// Hyphenated lowercase name.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Callback type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
}

/// A documented component slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSlot {
    /// Hyphenated lowercase name.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scoped slot props type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
}

/// One parameter of an exposed method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodParameter {
    /// Parameter name as written in the signature.
    pub name: String,
    /// Parameter type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
}

/// A method exposed through the component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMethod {
    /// Hyphenated lowercase name.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full declared type, usually a function signature.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    /// Parameters parsed from the signature.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<MethodParameter>,
    /// Return type parsed from the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeInfo>,
}

/// Assembled metadata for one documented component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentModel {
    /// Unique hyphenated tag, e.g. `y-date-picker`.
    pub tag_name: String,
    /// Short description from front matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Intro prose from the document body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    /// Link to the rendered documentation page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    /// Properties in document order.
    #[serde(default)]
    pub props: Vec<ComponentProp>,
    /// Events in document order.
    #[serde(default)]
    pub events: Vec<ComponentEvent>,
    /// Slots in document order.
    #[serde(default)]
    pub slots: Vec<ComponentSlot>,
    /// Exposed methods in document order.
    #[serde(default)]
    pub methods: Vec<ComponentMethod>,
}

impl ComponentModel {
    /// A model with only a tag name and no extracted sections.
    pub fn empty(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            description: None,
            detailed_description: None,
            doc_url: None,
            props: Vec::new(),
            events: Vec::new(),
            slots: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// The full, servable metadata set produced by one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    /// Library version the corpus was built against.
    pub version: String,
    /// When the batch ran.
    pub generated_at: DateTime<Utc>,
    /// One model per document.
    pub components: Vec<ComponentModel>,
}

impl Corpus {
    /// Look up a component by exact tag name.
    pub fn find(&self, tag_name: &str) -> Option<&ComponentModel> {
        self.components.iter().find(|c| c.tag_name == tag_name)
    }

    /// All tag names, sorted ascending.
    pub fn tag_names(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.components.iter().map(|c| c.tag_name.as_str()).collect();
        tags.sort_unstable();
        tags
    }
}
