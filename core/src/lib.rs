//! Multi-zone vector-space ranking of candidate urls for search queries.

pub mod config;
pub mod docfreq;
pub mod error;
pub mod features;
pub mod parser;
pub mod persist;
pub mod pipeline;
pub mod scorer;
pub mod tokenizer;
pub mod vector;
pub mod zones;

pub use config::{ScorerConfig, ZoneWeights, LENGTH_OFFSET};
pub use docfreq::DocFreqTable;
pub use error::{RankError, Result};
pub use features::{DocFeatures, FeatureStore, QueryResults};
pub use pipeline::{rank, RankedQuery, RankedResults, RankingPipeline, ScoredUrl};
pub use scorer::{BaselineScorer, QueryScorer, QueryVector, Scorer};
pub use zones::Zone;
