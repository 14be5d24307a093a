use crate::error::Result;
use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Added to `body_length` before it is used as a normalizer. Fixed policy.
pub const LENGTH_OFFSET: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneWeights {
    pub title: f64,
    pub header: f64,
    pub url: f64,
    pub body: f64,
    pub anchor: f64,
}

impl Default for ZoneWeights {
    fn default() -> Self {
        Self { title: 1.0, header: 0.3, url: 0.1, body: 0.3, anchor: 2.0 }
    }
}

impl ZoneWeights {
    pub fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Title => self.title,
            Zone::Header => self.header,
            Zone::Url => self.url,
            Zone::Body => self.body,
            Zone::Anchor => self.anchor,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub weights: ZoneWeights,
    /// Apply `1 + ln(count)` to each zone vector before weighting.
    pub sublinear_zones: bool,
}

impl ScorerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        let cfg = serde_json::from_reader(BufReader::new(f))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ScorerConfig = serde_json::from_str(r#"{"weights": {"anchor": 5.0}}"#).unwrap();
        assert_eq!(cfg.weights.anchor, 5.0);
        assert_eq!(cfg.weights.title, 1.0);
        assert_eq!(cfg.weights.get(Zone::Url), 0.1);
        assert!(!cfg.sublinear_zones);
    }

    #[test]
    fn loads_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorer.json");
        let cfg = ScorerConfig {
            weights: ZoneWeights { title: 2.0, ..ZoneWeights::default() },
            sublinear_zones: true,
        };
        std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
        assert_eq!(ScorerConfig::from_json_file(&path).unwrap(), cfg);

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(ScorerConfig::from_json_file(&path), Err(crate::RankError::Json(_))));
        assert!(matches!(ScorerConfig::from_json_file(dir.path().join("missing.json")), Err(crate::RankError::Io(_))));
    }
}
