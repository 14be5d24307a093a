use crate::error::{RankError, Result};
use crate::vector::Vector;
use std::collections::HashMap;

/// Read-only term -> document frequency lookup, built once from corpus statistics.
#[derive(Debug, Clone, Default)]
pub struct DocFreqTable {
    freqs: HashMap<String, u64>,
}

impl DocFreqTable {
    /// Builds a table, rejecting zero frequencies since `log10(0)` has no meaning as a weight.
    pub fn new(freqs: HashMap<String, u64>) -> Result<Self> {
        if let Some((term, &frequency)) = freqs.iter().find(|(_, &df)| df == 0) {
            return Err(RankError::InvalidFrequency { term: term.clone(), frequency });
        }
        Ok(Self { freqs })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(t, df)| (t.into(), df)).collect())
    }

    /// Exact lookup. Unknown terms are an error, never a default.
    pub fn frequency(&self, term: &str) -> Result<u64> {
        self.freqs
            .get(term)
            .copied()
            .ok_or_else(|| RankError::UnknownTerm { term: term.to_string() })
    }

    /// `log10(df)` for a term. This grows with document frequency; it is not
    /// an inverse weight.
    pub fn weight(&self, term: &str) -> Result<f64> {
        Ok((self.frequency(term)? as f64).log10())
    }

    /// Per-term weights aligned to a term ordering.
    pub fn weights<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vector> {
        terms.iter().map(|t| self.weight(t.as_ref())).collect()
    }

    pub fn len(&self) -> usize { self.freqs.len() }

    pub fn is_empty(&self) -> bool { self.freqs.is_empty() }

    pub fn as_map(&self) -> &HashMap<String, u64> { &self.freqs }
}
