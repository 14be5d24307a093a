use crate::docfreq::DocFreqTable;
use crate::error::{RankError, Result};
use crate::features::{FeatureStore, QueryResults};
use crate::parser::parse_features_file;
use crate::pipeline::RankedResults;
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    Ok(())
}

/// Load a term -> document frequency table. `.json` is an object, `.tsv`/`.txt`
/// one `term count` pair per line, anything else bincode.
pub fn load_doc_freq<P: AsRef<Path>>(path: P) -> Result<DocFreqTable> {
    let path = path.as_ref();
    let freqs: HashMap<String, u64> = match extension(path) {
        Some("json") => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        Some("tsv") | Some("txt") => read_doc_freq_text(BufReader::new(File::open(path)?))?,
        _ => {
            let mut f = File::open(path)?;
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            bincode::deserialize(&buf)?
        }
    };
    tracing::debug!(path = %path.display(), terms = freqs.len(), "loaded document frequencies");
    DocFreqTable::new(freqs)
}

fn read_doc_freq_text<R: BufRead>(reader: R) -> Result<HashMap<String, u64>> {
    let mut freqs = HashMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let (Some(term), Some(count), None) = (parts.next(), parts.next(), parts.next()) else {
            if line.trim().is_empty() { continue; }
            return Err(RankError::parse(i + 1, "expected '<term> <count>'"));
        };
        let df = count
            .parse()
            .map_err(|_| RankError::parse(i + 1, format!("invalid frequency {count:?}")))?;
        freqs.insert(term.to_string(), df);
    }
    Ok(freqs)
}

pub fn save_doc_freq<P: AsRef<Path>>(path: P, table: &DocFreqTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut f = File::create(path)?;
    let bytes = bincode::serialize(table.as_map())?;
    f.write_all(&bytes)?;
    Ok(())
}

/// Load a feature corpus: `.json` holds an array of query blocks, anything
/// else is the `key: value` text dump.
pub fn load_features<P: AsRef<Path>>(path: P) -> Result<FeatureStore> {
    let path = path.as_ref();
    let store = match extension(path) {
        Some("json") => {
            let blocks: Vec<QueryResults> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
            FeatureStore::from_queries(blocks)
        }
        _ => parse_features_file(path)?,
    };
    tracing::debug!(path = %path.display(), queries = store.len(), docs = store.num_docs(), "loaded features");
    Ok(store)
}

/// `query: <q>` followed by one indented `url: <u>` line per result.
pub fn write_ranked<W: Write>(mut w: W, ranked: &RankedResults) -> Result<()> {
    for q in ranked.iter() {
        writeln!(w, "query: {}", q.query)?;
        for url in q.urls() {
            writeln!(w, "  url: {}", url)?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn save_ranked<P: AsRef<Path>>(path: P, ranked: &RankedResults) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    write_ranked(BufWriter::new(File::create(path)?), ranked)
}
