//! Per-zone term-frequency vectors aligned to a query's term ordering.

use crate::error::Result;
use crate::tokenizer::{split_terms, url_to_text};
use crate::vector::{self, Vector};
use std::collections::BTreeMap;

/// Document regions scored separately before combination, in weighting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Title,
    Header,
    Url,
    Body,
    Anchor,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Title, Zone::Header, Zone::Url, Zone::Body, Zone::Anchor];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Title => "title",
            Zone::Header => "header",
            Zone::Url => "url",
            Zone::Body => "body",
            Zone::Anchor => "anchor",
        }
    }
}

/// Count of exact whitespace-token matches of each term in `text`.
pub fn vector_from_text<S: AsRef<str>>(terms: &[S], text: &str) -> Vector {
    let tokens: Vec<&str> = split_terms(text).collect();
    terms
        .iter()
        .map(|t| {
            let term: &str = t.as_ref();
            tokens.iter().filter(|&&tok| tok == term).count() as f64
        })
        .collect()
}

pub fn vector_from_headers<S: AsRef<str>>(terms: &[S], headers: &[String]) -> Result<Vector> {
    let mut acc = vec![0.0; terms.len()];
    for h in headers {
        vector::add_assign(&mut acc, &vector_from_text(terms, h))?;
    }
    Ok(acc)
}

/// Number of recorded body positions per term; absent terms count zero.
pub fn vector_from_body_hits<S: AsRef<str>>(terms: &[S], body_hits: &BTreeMap<String, Vec<u32>>) -> Vector {
    terms
        .iter()
        .map(|t| {
            let term: &str = t.as_ref();
            body_hits.get(term).map_or(0, Vec::len) as f64
        })
        .collect()
}

/// Anchor text vectors, each scaled by its linking-site count, summed.
pub fn vector_from_anchors<S: AsRef<str>>(terms: &[S], anchors: &BTreeMap<String, u64>) -> Result<Vector> {
    let mut acc = vec![0.0; terms.len()];
    for (text, &count) in anchors {
        let v = vector::scale(&vector_from_text(terms, text), count as f64);
        vector::add_assign(&mut acc, &v)?;
    }
    Ok(acc)
}

pub fn vector_from_url<S: AsRef<str>>(terms: &[S], url: &str) -> Vector {
    vector_from_text(terms, &url_to_text(url))
}
