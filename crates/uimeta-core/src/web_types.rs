//! JetBrains web-types output.
//!
//! IDEs read this file to complete tags, attributes, events and slots. It is
//! the one consumer that wants typed default values, so attribute defaults
//! go through [`typed_default`].

use serde::{Deserialize, Serialize};

use crate::defaults::{DefaultValue, typed_default};
use crate::types::{ComponentModel, ComponentProp, Corpus, TypeInfo, TypeKind};

/// Schema URL written into every document.
pub const WEB_TYPES_SCHEMA: &str = "http://json.schemastore.org/web-types";

/// A complete web-types document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebTypes {
    /// Schema reference.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Always `vue`.
    pub framework: String,
    /// Library package name.
    pub name: String,
    /// Library version from the corpus.
    pub version: String,
    /// Always `typescript`.
    pub js_types_syntax: String,
    /// Always `markdown`.
    pub description_markup: String,
    /// Element contributions.
    pub contributions: Contributions,
}

/// `contributions` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributions {
    /// HTML contributions.
    pub html: HtmlContributions,
}

/// `contributions.html` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlContributions {
    /// One entry per component.
    pub elements: Vec<Element>,
}

/// One component tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Component description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Documentation link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    /// Props.
    pub attributes: Vec<Attribute>,
    /// Emitted events.
    pub events: Vec<Named>,
    /// Slots.
    pub slots: Vec<Named>,
}

/// One prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Prop name.
    pub name: String,
    /// Prop description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Typed default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Value type.
    pub value: AttributeValue,
}

/// Attribute value descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Always `expression`.
    pub kind: String,
    /// TypeScript type text.
    #[serde(rename = "type")]
    pub type_text: String,
}

/// An event or slot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    /// Event or slot name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Build the web-types document for `corpus` under package `library_name`.
pub fn generate_web_types(corpus: &Corpus, library_name: &str) -> WebTypes {
    let mut elements: Vec<Element> = corpus.components.iter().map(element).collect();
    elements.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(elements = elements.len(), "generated web-types");
    WebTypes {
        schema: WEB_TYPES_SCHEMA.to_string(),
        framework: "vue".to_string(),
        name: library_name.to_string(),
        version: corpus.version.clone(),
        js_types_syntax: "typescript".to_string(),
        description_markup: "markdown".to_string(),
        contributions: Contributions {
            html: HtmlContributions { elements },
        },
    }
}

fn element(model: &ComponentModel) -> Element {
    Element {
        name: model.tag_name.clone(),
        description: model.description.clone(),
        doc_url: model.doc_url.clone(),
        attributes: model.props.iter().map(attribute).collect(),
        events: model
            .events
            .iter()
            .map(|e| Named {
                name: e.name.clone(),
                description: e.description.clone(),
            })
            .collect(),
        slots: model
            .slots
            .iter()
            .map(|s| Named {
                name: s.name.clone(),
                description: s.description.clone(),
            })
            .collect(),
    }
}

fn attribute(prop: &ComponentProp) -> Attribute {
    Attribute {
        name: prop.name.clone(),
        description: prop.description.clone(),
        default: prop
            .default
            .clone()
            .map(|value| typed_default(value, &prop.type_info)),
        value: AttributeValue {
            kind: "expression".to_string(),
            type_text: type_text(&prop.type_info),
        },
    }
}

/// TypeScript text for a prop type; empty annotations become `any`.
fn type_text(type_info: &TypeInfo) -> String {
    match &type_info.normalized {
        TypeKind::Simple(name) if name.is_empty() => "any".to_string(),
        _ => type_info.display(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::normalize::normalize_type;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn prop(name: &str, raw_type: &str, default: Option<&str>) -> ComponentProp {
        ComponentProp {
            name: name.to_string(),
            description: None,
            type_info: normalize_type(raw_type),
            default: default.map(ToString::to_string),
        }
    }

    fn corpus() -> Corpus {
        let mut button = ComponentModel::empty("y-button");
        button.description = Some("A button".to_string());
        button.doc_url = Some("https://example.dev/button".to_string());
        button.props = vec![
            prop("loading", "^[boolean]", Some("false")),
            prop("tabindex", "^[number]", Some("0")),
            prop("size", "^[string] / ^[number]", Some("default")),
            prop("native-type", "", None),
        ];
        Corpus {
            version: "3.0.0".to_string(),
            generated_at: Utc::now(),
            components: vec![ComponentModel::empty("y-tag"), button],
        }
    }

    #[test]
    fn test_document_header() {
        let doc = generate_web_types(&corpus(), "y-ui");

        assert_eq!(doc.framework, "vue");
        assert_eq!(doc.name, "y-ui");
        assert_eq!(doc.version, "3.0.0");
        let names: Vec<&str> = doc.contributions.html.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["y-button", "y-tag"]);
    }

    #[test]
    fn test_attributes_use_strict_defaults_and_joined_unions() {
        let doc = generate_web_types(&corpus(), "y-ui");
        let button = &doc.contributions.html.elements[0];

        assert_eq!(button.attributes[0].default, Some(DefaultValue::Bool(false)));
        assert_eq!(button.attributes[1].default, Some(DefaultValue::Number(0.0)));
        assert_eq!(
            button.attributes[2].default,
            Some(DefaultValue::String("default".to_string()))
        );
        assert_eq!(button.attributes[2].value.type_text, "string | number");
        assert_eq!(button.attributes[3].value.type_text, "any");
        assert_eq!(button.attributes[3].default, None);
    }

    #[test]
    fn test_stored_default_is_not_unquoted_twice() {
        // Given: A prop whose cell was `'hello'` and is stored as 'hello'
        let stored = crate::defaults::coerce_default("`'hello'`");
        let mut field = ComponentModel::empty("y-field");
        field.props = vec![prop("label", "^[string]", stored.as_deref())];
        let corpus = Corpus {
            version: "1.0.0".to_string(),
            generated_at: Utc::now(),
            components: vec![field],
        };

        // When: Generating web-types
        let doc = generate_web_types(&corpus, "y-ui");

        // Then: Only the one layer removed at assembly time is gone
        assert_eq!(
            doc.contributions.html.elements[0].attributes[0].default,
            Some(DefaultValue::String("'hello'".to_string()))
        );
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(generate_web_types(&corpus(), "y-ui")).unwrap();

        assert_eq!(json["$schema"], WEB_TYPES_SCHEMA);
        assert_eq!(json["js-types-syntax"], "typescript");
        let button = &json["contributions"]["html"]["elements"][0];
        assert_eq!(button["doc-url"], "https://example.dev/button");
        assert_eq!(button["attributes"][0]["default"], false);
        assert_eq!(button["attributes"][0]["value"]["type"], "boolean");
    }
}
