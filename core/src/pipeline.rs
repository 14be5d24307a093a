use crate::docfreq::DocFreqTable;
use crate::error::{RankError, Result};
use crate::features::{FeatureStore, QueryResults};
use crate::scorer::Scorer;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredUrl {
    pub url: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedQuery {
    pub query: String,
    /// Most relevant first.
    pub results: Vec<ScoredUrl>,
}

impl RankedQuery {
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.url.as_str())
    }
}

/// Ranked url lists grouped by query, in the feature store's query order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedResults {
    pub queries: Vec<RankedQuery>,
}

impl RankedResults {
    pub fn get(&self, query: &str) -> Option<&RankedQuery> {
        self.queries.iter().find(|q| q.query == query)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedQuery> {
        self.queries.iter()
    }

    pub fn total_urls(&self) -> usize {
        self.queries.iter().map(|q| q.results.len()).sum()
    }
}

/// Sort descending by score. Stable, so tied urls keep their input order.
pub fn sort_by_score(results: &mut [ScoredUrl]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

pub struct RankingPipeline<'a> {
    doc_freq: &'a DocFreqTable,
    scorer: &'a dyn Scorer,
}

impl<'a> RankingPipeline<'a> {
    pub fn new(doc_freq: &'a DocFreqTable, scorer: &'a dyn Scorer) -> Self {
        Self { doc_freq, scorer }
    }

    pub fn rank_query(&self, results: &QueryResults) -> Result<RankedQuery> {
        let scores = self
            .scorer
            .score_query(&results.query, &results.docs, self.doc_freq)
            .map_err(|e| RankError::Scoring { query: results.query.clone(), source: Box::new(e) })?;
        let mut scored: Vec<ScoredUrl> = results
            .docs
            .iter()
            .zip(scores)
            .map(|(d, score)| ScoredUrl { url: d.url.clone(), score })
            .collect();
        sort_by_score(&mut scored);
        Ok(RankedQuery { query: results.query.clone(), results: scored })
    }

    /// Ranks every query. The first failing query aborts the run.
    pub fn rank(&self, features: &FeatureStore) -> Result<RankedResults> {
        let queries = features.iter().map(|q| self.rank_query(q)).collect::<Result<Vec<_>>>()?;
        let ranked = RankedResults { queries };
        tracing::info!(scorer = self.scorer.name(), queries = ranked.queries.len(), urls = ranked.total_urls(), "ranking complete");
        Ok(ranked)
    }
}

pub fn rank(features: &FeatureStore, doc_freq: &DocFreqTable, scorer: &dyn Scorer) -> Result<RankedResults> {
    RankingPipeline::new(doc_freq, scorer).rank(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_input_order() {
        let mut v = vec![
            ScoredUrl { url: "a".into(), score: 1.0 },
            ScoredUrl { url: "b".into(), score: 2.0 },
            ScoredUrl { url: "c".into(), score: 1.0 },
            ScoredUrl { url: "d".into(), score: 2.0 },
        ];
        sort_by_score(&mut v);
        let urls: Vec<&str> = v.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn nan_scores_sort_consistently() {
        let mut v = vec![
            ScoredUrl { url: "low".into(), score: 0.5 },
            ScoredUrl { url: "nan".into(), score: f64::NAN },
            ScoredUrl { url: "high".into(), score: 3.0 },
            ScoredUrl { url: "zero".into(), score: 0.0 },
        ];
        sort_by_score(&mut v);
        let urls: Vec<&str> = v.iter().filter(|s| !s.score.is_nan()).map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["high", "low", "zero"]);
        assert_eq!(v.len(), 4);
    }
}
