//! Read-side operations over an assembled corpus.
//!
//! [`QueryService`] answers list, search, get and examples calls. Results are
//! memoized per operation and arguments in a [`VersionedCache`], so a library
//! upgrade observed through the [`VersionSource`] drops every cached answer.
//!
//! Output types serialize with camelCase keys and are what the CLI prints in
//! JSON mode.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::cache::VersionedCache;
use crate::storage::Storage;
use crate::types::{ComponentModel, Corpus};
use crate::version::VersionSource;
use crate::{Error, Result};

/// One line of a list or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    /// Component tag.
    pub tag_name: String,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Documentation link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl From<&ComponentModel> for ComponentSummary {
    fn from(model: &ComponentModel) -> Self {
        Self {
            tag_name: model.tag_name.clone(),
            description: model.description.clone(),
            doc_url: model.doc_url.clone(),
        }
    }
}

/// Output of [`QueryService::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput {
    /// Number of components.
    pub total: usize,
    /// All components, ascending by tag.
    pub components: Vec<ComponentSummary>,
}

/// Parameters of [`QueryService::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Case-insensitive substring matched against tag and description.
    pub keyword: String,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Output of [`QueryService::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    /// Keyword trimmed and lowercased, as matched.
    pub keyword: String,
    /// Match count before the limit was applied.
    pub total: usize,
    /// Matches, ascending by tag.
    pub results: Vec<ComponentSummary>,
}

/// Output of [`QueryService::get`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetail {
    /// The full model.
    #[serde(flatten)]
    pub component: ComponentModel,
    /// Contents of the supplementary type-definition file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_definition: Option<String>,
}

/// Output of [`QueryService::get_examples`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplesOutput {
    /// Requested tag.
    pub tag_name: String,
    /// Example text, or the placeholder when none exist.
    pub content: String,
    /// Whether an example file was found.
    pub found: bool,
}

impl ExamplesOutput {
    fn placeholder(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            content: format!("No examples found for {tag_name}"),
            found: false,
        }
    }
}

#[derive(Clone)]
enum Cached {
    List(Arc<ListOutput>),
    Search(Arc<SearchOutput>),
    Detail(Arc<ComponentDetail>),
    Examples(Arc<ExamplesOutput>),
}

struct State<S> {
    corpus: Arc<Corpus>,
    cache: VersionedCache<String, Cached, S>,
}

/// Query front end over one corpus.
///
/// One mutex guards both the corpus reference and the cache, so a lookup,
/// its computation and the cache fill never interleave with a swap.
pub struct QueryService<S> {
    state: Mutex<State<S>>,
    storage: Storage,
}

impl<S: VersionSource> QueryService<S> {
    /// Serve `corpus`, reading supplementary files from `storage`.
    pub fn new(corpus: Arc<Corpus>, storage: Storage, version: S) -> Self {
        Self {
            state: Mutex::new(State {
                corpus,
                cache: VersionedCache::new(version),
            }),
            storage,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The corpus currently served.
    pub fn corpus(&self) -> Arc<Corpus> {
        Arc::clone(&self.lock().corpus)
    }

    /// Replace the corpus and drop every cached answer.
    pub fn swap_corpus(&self, corpus: Arc<Corpus>) {
        let mut state = self.lock();
        state.corpus = corpus;
        state.cache.clear();
        tracing::info!(
            components = state.corpus.components.len(),
            version = %state.corpus.version,
            "corpus swapped"
        );
    }

    /// Number of cached answers.
    pub fn cached_entries(&self) -> usize {
        self.lock().cache.len()
    }

    /// Number of version changes the cache has observed.
    pub fn cache_generation(&self) -> u64 {
        self.lock().cache.generation()
    }

    /// All components ascending by tag.
    #[tracing::instrument(skip(self))]
    pub fn list(&self) -> Arc<ListOutput> {
        let mut state = self.lock();
        if let Some(Cached::List(hit)) = state.cache.get("list") {
            tracing::debug!("cache hit");
            return Arc::clone(hit);
        }

        let mut components: Vec<ComponentSummary> =
            state.corpus.components.iter().map(ComponentSummary::from).collect();
        components.sort_by(|a, b| a.tag_name.cmp(&b.tag_name));
        let output = Arc::new(ListOutput {
            total: components.len(),
            components,
        });

        state
            .cache
            .set("list".to_string(), Cached::List(Arc::clone(&output)));
        output
    }

    /// Components whose tag or description contains `keyword`, ignoring case.
    #[tracing::instrument(skip(self))]
    pub fn search(&self, keyword: &str, limit: Option<usize>) -> Arc<SearchOutput> {
        let needle = keyword.trim().to_lowercase();
        let key = format!(
            "search:{needle}:{}",
            limit.map_or_else(|| "all".to_string(), |l| l.to_string())
        );

        let mut state = self.lock();
        if let Some(Cached::Search(hit)) = state.cache.get(key.as_str()) {
            tracing::debug!("cache hit");
            return Arc::clone(hit);
        }

        let mut matches: Vec<ComponentSummary> = state
            .corpus
            .components
            .iter()
            .filter(|c| {
                c.tag_name.to_lowercase().contains(&needle)
                    || c.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .map(ComponentSummary::from)
            .collect();
        matches.sort_by(|a, b| a.tag_name.cmp(&b.tag_name));

        let total = matches.len();
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        let output = Arc::new(SearchOutput {
            keyword: needle,
            total,
            results: matches,
        });

        state.cache.set(key, Cached::Search(Arc::clone(&output)));
        output
    }

    /// Run a search from deserialized parameters.
    pub fn search_with(&self, params: &SearchParams) -> Arc<SearchOutput> {
        self.search(&params.keyword, params.limit)
    }

    /// Full model of `tag_name` plus its type definitions.
    ///
    /// Fails with [`Error::NotFound`] listing the available tags. An unreadable
    /// type definition is logged and left out.
    #[tracing::instrument(skip(self))]
    pub fn get(&self, tag_name: &str) -> Result<Arc<ComponentDetail>> {
        let tag = tag_name.trim();
        let key = format!("get:{tag}");

        let mut state = self.lock();
        if let Some(Cached::Detail(hit)) = state.cache.get(key.as_str()) {
            tracing::debug!("cache hit");
            return Ok(Arc::clone(hit));
        }

        let Some(component) = state.corpus.find(tag).cloned() else {
            return Err(Error::NotFound(format!(
                "component '{tag}' not found; available: {}",
                state.corpus.tag_names().join(", ")
            )));
        };

        let type_definition = self.storage.type_definition(tag).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "type definition unreadable, omitting it");
            None
        });
        let output = Arc::new(ComponentDetail {
            component,
            type_definition,
        });

        state.cache.set(key, Cached::Detail(Arc::clone(&output)));
        Ok(output)
    }

    /// Example documentation for `tag_name`, or a placeholder. Never fails.
    #[tracing::instrument(skip(self))]
    pub fn get_examples(&self, tag_name: &str) -> Arc<ExamplesOutput> {
        let tag = tag_name.trim();
        let key = format!("examples:{tag}");

        let mut state = self.lock();
        if let Some(Cached::Examples(hit)) = state.cache.get(key.as_str()) {
            tracing::debug!("cache hit");
            return Arc::clone(hit);
        }

        let output = match self.storage.examples(tag) {
            Ok(Some(content)) => ExamplesOutput {
                tag_name: tag.to_string(),
                content,
                found: true,
            },
            Ok(None) => ExamplesOutput::placeholder(tag),
            Err(e) => {
                tracing::warn!(error = %e, "examples unreadable, using placeholder");
                ExamplesOutput::placeholder(tag)
            },
        };
        let output = Arc::new(output);

        state.cache.set(key, Cached::Examples(Arc::clone(&output)));
        output
    }
}
