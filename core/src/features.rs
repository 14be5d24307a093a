use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Query-dependent features for one candidate url.
///
/// `title` and `body_length` are required for scoring but stay optional here so
/// an incomplete record can be represented and reported instead of rejected at load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocFeatures {
    pub url: String,
    pub title: Option<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    /// Query term -> positions of that term in the body.
    #[serde(default)]
    pub body_hits: BTreeMap<String, Vec<u32>>,
    pub body_length: Option<u64>,
    pub pagerank: Option<i64>,
    /// Anchor text -> number of distinct linking sites using it.
    #[serde(default)]
    pub anchors: BTreeMap<String, u64>,
}

impl DocFeatures {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body_length(mut self, len: u64) -> Self {
        self.body_length = Some(len);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    pub fn with_body_hits(mut self, term: impl Into<String>, positions: Vec<u32>) -> Self {
        self.body_hits.insert(term.into(), positions);
        self
    }

    pub fn with_anchor(mut self, text: impl Into<String>, count: u64) -> Self {
        self.anchors.insert(text.into(), count);
        self
    }
}

/// A query with its candidate urls in retrieval order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    pub query: String,
    #[serde(default)]
    pub docs: Vec<DocFeatures>,
}

impl QueryResults {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), docs: Vec::new() }
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.url.as_str())
    }
}

/// Parsed corpus: query -> ordered url records. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    queries: Vec<QueryResults>,
    by_query: HashMap<String, usize>,
}

impl FeatureStore {
    pub fn new() -> Self { Self::default() }

    /// Builds a store, keeping first-seen query order. A repeated query
    /// replaces the earlier block's urls in place.
    pub fn from_queries(queries: impl IntoIterator<Item = QueryResults>) -> Self {
        let mut store = Self::new();
        for q in queries {
            store.insert(q);
        }
        store
    }

    pub fn insert(&mut self, results: QueryResults) {
        match self.by_query.get(&results.query) {
            Some(&idx) => self.queries[idx] = results,
            None => {
                self.by_query.insert(results.query.clone(), self.queries.len());
                self.queries.push(results);
            }
        }
    }

    pub fn get(&self, query: &str) -> Option<&QueryResults> {
        self.by_query.get(query).map(|&idx| &self.queries[idx])
    }

    pub fn doc(&self, query: &str, url: &str) -> Option<&DocFeatures> {
        self.get(query)?.docs.iter().find(|d| d.url == url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryResults> {
        self.queries.iter()
    }

    pub fn len(&self) -> usize { self.queries.len() }

    pub fn is_empty(&self) -> bool { self.queries.is_empty() }

    pub fn num_docs(&self) -> usize {
        self.queries.iter().map(|q| q.docs.len()).sum()
    }
}
