//! Reader for the line-oriented `key: value` feature dump.
//!
//! ```text
//! query: stanford cs
//! url: http://cs.stanford.edu/
//! title: stanford computer science
//! header: about the department
//! body_hits: stanford 4 19 88
//! body_length: 512
//! pagerank: 7
//! anchor_text: stanford cs home
//! stanford_anchor_count: 12
//! ```

use crate::error::{RankError, Result};
use crate::features::{DocFeatures, FeatureStore, QueryResults};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

#[derive(Default)]
struct ParseState {
    queries: Vec<QueryResults>,
    positions: HashMap<String, usize>,
    current: Option<usize>,
    current_doc: Option<usize>,
    anchor_text: Option<String>,
}

impl ParseState {
    fn start_query(&mut self, query: &str) {
        let idx = match self.positions.get(query) {
            Some(&idx) => {
                self.queries[idx].docs.clear();
                idx
            }
            None => {
                self.positions.insert(query.to_string(), self.queries.len());
                self.queries.push(QueryResults::new(query));
                self.queries.len() - 1
            }
        };
        self.current = Some(idx);
        self.current_doc = None;
        self.anchor_text = None;
    }

    fn start_url(&mut self, line: usize, url: &str) -> Result<()> {
        let idx = self.current.ok_or_else(|| RankError::parse(line, "url before any query"))?;
        let docs = &mut self.queries[idx].docs;
        // A repeated url starts a fresh record at its first position.
        let pos = match docs.iter().position(|d| d.url == url) {
            Some(pos) => {
                docs[pos] = DocFeatures::new(url);
                pos
            }
            None => {
                docs.push(DocFeatures::new(url));
                docs.len() - 1
            }
        };
        self.current_doc = Some(pos);
        self.anchor_text = None;
        Ok(())
    }

    fn doc(&mut self, line: usize, key: &str) -> Result<&mut DocFeatures> {
        self.current
            .zip(self.current_doc)
            .and_then(|(q, d)| self.queries[q].docs.get_mut(d))
            .ok_or_else(|| RankError::parse(line, format!("'{key}' before any url")))
    }
}

fn parse_int<T: FromStr>(line: usize, key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| RankError::parse(line, format!("invalid integer for '{key}': {value:?}")))
}

fn split_line(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((k, v)) => (k.trim(), v.trim()),
        None => (raw.trim(), raw.trim()),
    }
}

pub fn parse_features<R: BufRead>(reader: R) -> Result<FeatureStore> {
    let mut st = ParseState::default();
    for (i, raw) in reader.lines().enumerate() {
        let raw = raw?;
        let line = i + 1;
        if raw.trim().is_empty() { continue; }
        let (key, value) = split_line(&raw);
        match key {
            "query" => st.start_query(value),
            "url" => st.start_url(line, value)?,
            "title" => st.doc(line, key)?.title = Some(value.to_string()),
            "header" => st.doc(line, key)?.headers.push(value.to_string()),
            "body_hits" => {
                let (term, rest) = value.split_once(' ').unwrap_or((value, ""));
                let positions = rest
                    .split_whitespace()
                    .map(|p| parse_int(line, key, p))
                    .collect::<Result<Vec<u32>>>()?;
                st.doc(line, key)?.body_hits.insert(term.trim().to_string(), positions);
            }
            "body_length" => st.doc(line, key)?.body_length = Some(parse_int(line, key, value)?),
            "pagerank" => st.doc(line, key)?.pagerank = Some(parse_int(line, key, value)?),
            "anchor_text" => {
                st.doc(line, key)?;
                st.anchor_text = Some(value.to_string());
            }
            "stanford_anchor_count" => {
                let count: u64 = parse_int(line, key, value)?;
                let text = st
                    .anchor_text
                    .clone()
                    .ok_or_else(|| RankError::parse(line, "anchor count before any anchor_text"))?;
                st.doc(line, key)?.anchors.insert(text, count);
            }
            other => tracing::warn!(line, key = other, "ignoring unknown feature key"),
        }
    }
    Ok(FeatureStore::from_queries(st.queries))
}

pub fn parse_features_file<P: AsRef<Path>>(path: P) -> Result<FeatureStore> {
    let f = File::open(path)?;
    parse_features(BufReader::new(f))
}
