//! End-to-end: docs directory → corpus.json → queries.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use uimeta_core::{
    Config, CorpusBuilder, ManifestVersion, QueryService, Storage, TypeKind, generate_web_types,
};

const SELECT: &str = r"---
title: Select 选择器
description: Pick one option from a dropdown.
---

# Select 选择器

When there are plenty of options, use a drop-down menu.

## API

### Attributes

| 属性名 | 说明 | 类型 | 默认值 |
| --- | --- | --- | --- |
| model-value / v-model | binding value | ^[string] / ^[number] / ^[boolean] / ^[object] | — |
| multiple | whether multiple-select is activated | ^[boolean] | false |
| size | size of input | ^[enum]`'large' \| 'default' \| 'small'` | 'default' |
| collapseTags | collapse tags | ^[boolean] | false |

### Events

| 事件名 | 说明 | 回调参数 |
| --- | --- | --- |
| change | triggers when the selected value changes | ^[Function]`(value: any) => void` |
| visible-change | triggers when the dropdown appears | ^[Function]`(visible: boolean) => void` |

### Slots

| 插槽名 | 说明 | 作用域参数 |
| --- | --- | --- |
| default | option component list | — |
| empty | content when there is no options | — |

### Exposes

| 方法名 | 说明 | 类型 |
| --- | --- | --- |
| focus | focus the input | ^[Function]`() => void` |
| blur | blur the input | ^[Function]`() => void` |
";

const BUTTON: &str = "---\ntitle: Button 按钮\ndescription: Commonly used button.\n---\n\n# Button\n\n## API\n";

fn write_fixture(root: &Path) -> Config {
    let docs = root.join("docs");
    fs::create_dir_all(docs.join("form")).unwrap();
    fs::write(docs.join("button.md"), BUTTON).unwrap();
    fs::write(docs.join("form").join("select.md"), SELECT).unwrap();
    fs::write(root.join("package.json"), r#"{"name": "y-ui", "version": "2.4.0"}"#).unwrap();
    fs::write(
        root.join("uimeta.toml"),
        "[paths]\ndocs_dir = \"docs\"\ndata_dir = \"data\"\n\n[parse]\ndoc_base_url = \"https://y-ui.dev/components\"\n",
    )
    .unwrap();
    Config::load_from(&root.join("uimeta.toml")).unwrap()
}

#[test]
fn test_docs_to_queries() {
    // Given: A small documentation tree and config
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());
    let storage = Storage::with_root(config.paths.data_dir.clone()).unwrap();
    let version = ManifestVersion::new(&config.paths.manifest);

    // When: Building and persisting the corpus
    let builder = CorpusBuilder::new(&config.paths.docs_dir, config.parse.clone(), version.clone());
    let (built, report) = builder.build_and_persist(&storage).unwrap();

    // Then: Both documents were assembled and stamped
    assert_eq!(report.documents, 2);
    assert_eq!(report.failures, 0);
    assert_eq!(built.version, "2.4.0");

    // And: The persisted corpus serves queries
    let corpus = Arc::new(storage.load_corpus().unwrap());
    let service = QueryService::new(corpus, storage.clone(), version);

    let list = service.list();
    let tags: Vec<&str> = list.components.iter().map(|c| c.tag_name.as_str()).collect();
    assert_eq!(tags, vec!["y-button", "y-select"]);

    let detail = service.get("y-select").unwrap();
    let select = &detail.component;
    assert_eq!(
        select.doc_url.as_deref(),
        Some("https://y-ui.dev/components/select")
    );
    assert_eq!(
        select.detailed_description.as_deref(),
        Some("When there are plenty of options, use a drop-down menu.")
    );

    let props: Vec<&str> = select.props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(props, vec!["model-value", "multiple", "size", "collapse-tags"]);
    assert_eq!(
        select.props[0].type_info.normalized,
        TypeKind::Union(vec![
            "string".to_string(),
            "number".to_string(),
            "boolean".to_string(),
            "object".to_string(),
        ])
    );
    assert_eq!(select.props[0].default, None);
    assert_eq!(select.props[2].default.as_deref(), Some("default"));

    assert_eq!(select.events.len(), 2);
    assert_eq!(select.events[1].name, "visible-change");
    assert_eq!(select.slots.len(), 2);
    assert_eq!(select.methods.len(), 2);
    assert!(select.methods[0].parameters.is_empty());
    assert!(select.methods[0].returns.as_ref().unwrap().is_simple("void"));

    let button = service.get("y-button").unwrap();
    assert!(button.component.props.is_empty());
    assert!(button.component.events.is_empty());
    assert!(button.component.slots.is_empty());
    assert!(button.component.methods.is_empty());

    let search = service.search("dropdown", None);
    assert_eq!(search.total, 1);
    assert_eq!(search.results[0].tag_name, "y-select");

    let examples = service.get_examples("y-select");
    assert_eq!(examples.content, "No examples found for y-select");
}

#[test]
fn test_version_bump_invalidates_answers() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());
    let storage = Storage::with_root(config.paths.data_dir.clone()).unwrap();
    let version = ManifestVersion::new(&config.paths.manifest);
    let (corpus, _) = CorpusBuilder::new(&config.paths.docs_dir, config.parse.clone(), version.clone())
        .build()
        .unwrap();
    let service = QueryService::new(Arc::new(corpus), storage, version);

    // Given: An examples answer cached before the file existed
    assert!(!service.get_examples("y-select").found);
    fs::create_dir_all(config.paths.data_dir.join("examples")).unwrap();
    fs::write(config.paths.data_dir.join("examples").join("y-select.md"), "# Demo").unwrap();
    assert!(!service.get_examples("y-select").found);

    // When: The package version changes
    fs::write(&config.paths.manifest, r#"{"version": "2.5.0"}"#).unwrap();

    // Then: The next call recomputes
    assert!(service.get_examples("y-select").found);
    assert_eq!(service.cache_generation(), 1);
}

#[test]
fn test_web_types_from_built_corpus() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());
    let version = ManifestVersion::new(&config.paths.manifest);
    let (corpus, _) = CorpusBuilder::new(&config.paths.docs_dir, config.parse, version)
        .build()
        .unwrap();

    let json = serde_json::to_value(generate_web_types(&corpus, "y-ui")).unwrap();

    let select = &json["contributions"]["html"]["elements"][1];
    assert_eq!(select["name"], "y-select");
    assert_eq!(select["attributes"][1]["default"], false);
    assert_eq!(
        select["attributes"][0]["value"]["type"],
        "string | number | boolean | object"
    );
}
