use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rankcore::persist::{load_doc_freq, load_features, save_ranked, write_ranked};
use rankcore::{BaselineScorer, QueryScorer, RankingPipeline, Scorer, ScorerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank candidate urls per query with a multi-zone vector-space model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScorerKind {
    /// Weighted title/header/url/body/anchor vectors
    Tfidf,
    /// Total body hits for the query terms
    Baseline,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every query's urls and write the ranked lists
    Rank {
        /// Feature dump (`key: value` text, or `.json` query blocks)
        #[arg(long)]
        features: PathBuf,
        /// Term document-frequency table (bincode, `.json` or `.tsv`)
        #[arg(long, default_value = "term_doc_freq")]
        doc_freq: PathBuf,
        /// Output file, or `-` for stdout
        #[arg(long, default_value = "ranked.txt")]
        output: String,
        #[arg(long, value_enum, default_value_t = ScorerKind::Tfidf)]
        scorer: ScorerKind,
        /// JSON scorer config (zone weights, sublinear_zones)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Apply 1 + ln(count) to zone vectors before weighting
        #[arg(long, default_value_t = false)]
        sublinear_zones: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { features, doc_freq, output, scorer, config, sublinear_zones } => {
            let mut cfg = match config {
                Some(p) => ScorerConfig::from_json_file(&p).with_context(|| format!("reading config {}", p.display()))?,
                None => ScorerConfig::default(),
            };
            cfg.sublinear_zones |= sublinear_zones;
            run_rank(&features, &doc_freq, &output, scorer, cfg)
        }
    }
}

fn run_rank(features: &Path, doc_freq: &Path, output: &str, kind: ScorerKind, cfg: ScorerConfig) -> Result<()> {
    let store = load_features(features).with_context(|| format!("loading features from {}", features.display()))?;
    let table = load_doc_freq(doc_freq).with_context(|| format!("loading document frequencies from {}", doc_freq.display()))?;

    let tfidf = QueryScorer::new(cfg);
    let scorer: &dyn Scorer = match kind {
        ScorerKind::Tfidf => &tfidf,
        ScorerKind::Baseline => &BaselineScorer,
    };
    let ranked = RankingPipeline::new(&table, scorer).rank(&store)?;

    if output == "-" {
        write_ranked(std::io::stdout().lock(), &ranked)?;
    } else {
        save_ranked(output, &ranked).with_context(|| format!("writing {output}"))?;
    }
    tracing::info!(total = ranked.total_urls(), output, "ranked urls written");
    Ok(())
}
