//! Relevance scoring for a query's candidate documents.

use crate::config::{ScorerConfig, LENGTH_OFFSET};
use crate::docfreq::DocFreqTable;
use crate::error::{RankError, Result};
use crate::features::DocFeatures;
use crate::tokenizer::term_ordering;
use crate::vector::{self, Vector};
use crate::zones::{self, Zone};

/// Scores every candidate of one query. Scores come back in `docs` order.
pub trait Scorer {
    fn name(&self) -> &'static str;

    fn score_query(&self, query: &str, docs: &[DocFeatures], doc_freq: &DocFreqTable) -> Result<Vec<f64>>;
}

/// A query's term ordering together with its weighted vector.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    pub terms: Vec<String>,
    pub weights: Vector,
}

impl QueryVector {
    /// `sublinear(tf(query)) * log10(df)` per distinct term.
    pub fn build(query: &str, doc_freq: &DocFreqTable) -> Result<Self> {
        let terms = term_ordering(query);
        let tf = vector::sublinear_scale(&zones::vector_from_text(&terms, query));
        let df = doc_freq.weights(&terms)?;
        let weights = vector::product(&tf, &df)?;
        Ok(Self { terms, weights })
    }
}

/// Weighted multi-zone TF-IDF-style scorer.
#[derive(Debug, Clone, Default)]
pub struct QueryScorer {
    config: ScorerConfig,
}

impl QueryScorer {
    pub fn new(config: ScorerConfig) -> Self { Self { config } }

    /// Raw zone vectors for a document, in [`Zone::ALL`] order.
    pub fn zone_vectors(&self, query: &str, terms: &[String], doc: &DocFeatures) -> Result<[Vector; 5]> {
        let title = doc.title.as_deref().ok_or_else(|| missing(query, doc, "title"))?;
        Ok([
            zones::vector_from_text(terms, title),
            zones::vector_from_headers(terms, &doc.headers)?,
            zones::vector_from_url(terms, &doc.url),
            zones::vector_from_body_hits(terms, &doc.body_hits),
            zones::vector_from_anchors(terms, &doc.anchors)?,
        ])
    }

    /// Length-normalized weighted sum of the zone vectors.
    pub fn document_vector(&self, query: &str, terms: &[String], doc: &DocFeatures) -> Result<Vector> {
        let body_length = doc.body_length.ok_or_else(|| missing(query, doc, "body_length"))?;
        let normalizer = body_length as f64 + LENGTH_OFFSET as f64;
        let mut acc = vec![0.0; terms.len()];
        for (zone, raw) in Zone::ALL.into_iter().zip(self.zone_vectors(query, terms, doc)?) {
            tracing::trace!(url = %doc.url, zone = zone.name(), vector = ?raw, "zone vector");
            let v = if self.config.sublinear_zones { vector::sublinear_scale(&raw) } else { raw };
            let alpha = self.config.weights.get(zone) / normalizer;
            vector::add_assign(&mut acc, &vector::scale(&v, alpha))?;
        }
        Ok(acc)
    }

    pub fn score_document(&self, query: &str, qvec: &QueryVector, doc: &DocFeatures) -> Result<f64> {
        let dvec = self.document_vector(query, &qvec.terms, doc)?;
        vector::dot(&qvec.weights, &dvec)
    }
}

impl Scorer for QueryScorer {
    fn name(&self) -> &'static str { "tfidf" }

    fn score_query(&self, query: &str, docs: &[DocFeatures], doc_freq: &DocFreqTable) -> Result<Vec<f64>> {
        let qvec = QueryVector::build(query, doc_freq)?;
        tracing::debug!(query, terms = qvec.terms.len(), docs = docs.len(), "scoring query");
        docs.iter().map(|d| self.score_document(query, &qvec, d)).collect()
    }
}

/// Comparison baseline: total body hits over all matched terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineScorer;

impl Scorer for BaselineScorer {
    fn name(&self) -> &'static str { "baseline" }

    fn score_query(&self, _query: &str, docs: &[DocFeatures], _doc_freq: &DocFreqTable) -> Result<Vec<f64>> {
        Ok(docs
            .iter()
            .map(|d| d.body_hits.values().map(Vec::len).sum::<usize>() as f64)
            .collect())
    }
}

fn missing(query: &str, doc: &DocFeatures, field: &'static str) -> RankError {
    RankError::MissingField { query: query.to_string(), url: doc.url.clone(), field }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DocFreqTable {
        DocFreqTable::from_pairs([("t", 10), ("u", 100)]).unwrap()
    }

    #[test]
    fn title_only_score_matches_hand_computation() {
        let doc = DocFeatures::new("x").with_title("t t t").with_body_length(0);
        let scores = QueryScorer::default().score_query("t", &[doc], &table()).unwrap();
        // sublinear(1) * log10(10) * (1.0 * 3 / 400)
        assert!((scores[0] - 3.0 / 400.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_query_term_is_dampened() {
        let qvec = QueryVector::build("t t", &table()).unwrap();
        assert_eq!(qvec.terms, vec!["t"]);
        assert!((qvec.weights[0] - (1.0 + 2f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn all_zones_contribute_with_their_weights() {
        let doc = DocFeatures::new("http://site/u")
            .with_title("u")
            .with_header("u u")
            .with_body_hits("u", vec![1, 2, 3])
            .with_anchor("u", 4)
            .with_body_length(100);
        let scores = QueryScorer::default().score_query("u", &[doc], &table()).unwrap();
        let expected = 2.0 * (1.0 * 1.0 + 0.3 * 2.0 + 0.1 * 1.0 + 0.3 * 3.0 + 2.0 * 4.0) / 500.0;
        assert!((scores[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn sublinear_zones_toggle() {
        let doc = DocFeatures::new("x").with_title("t t t").with_body_length(0);
        let scorer = QueryScorer::new(ScorerConfig { sublinear_zones: true, ..Default::default() });
        let scores = scorer.score_query("t", &[doc], &table()).unwrap();
        assert!((scores[0] - (1.0 + 3f64.ln()) / 400.0).abs() < 1e-12);
    }

    #[test]
    fn huge_body_length_does_not_overflow() {
        let doc = DocFeatures::new("x").with_title("t").with_body_length(u64::MAX);
        let scores = QueryScorer::default().score_query("t", &[doc], &table()).unwrap();
        let expected = 1.0 / (u64::MAX as f64 + 400.0);
        assert!(scores[0] > 0.0);
        assert!((scores[0] - expected).abs() < 1e-30);
    }

    #[test]
    fn unknown_term_is_an_error() {
        let doc = DocFeatures::new("x").with_title("t").with_body_length(0);
        let err = QueryScorer::default().score_query("t zzz", &[doc], &table()).unwrap_err();
        assert!(matches!(err, RankError::UnknownTerm { ref term } if term == "zzz"));
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let no_title = DocFeatures::new("a").with_body_length(5);
        let err = QueryScorer::default().score_query("t", &[no_title], &table()).unwrap_err();
        assert!(matches!(err, RankError::MissingField { field: "title", .. }));

        let no_len = DocFeatures::new("b").with_title("t");
        let err = QueryScorer::default().score_query("t", &[no_len], &table()).unwrap_err();
        assert!(matches!(err, RankError::MissingField { field: "body_length", .. }));
    }

    #[test]
    fn baseline_sums_hit_counts() {
        let doc = DocFeatures::new("x").with_body_hits("a", vec![1, 2]).with_body_hits("b", vec![7]);
        let scores = BaselineScorer.score_query("a b", &[doc, DocFeatures::new("y")], &table()).unwrap();
        assert_eq!(scores, vec![3.0, 0.0]);
    }
}
