//! # search-cluster CLI (`scl`)
//!
//! Runs one search, clusters the results by topic, and prints them.
//!
//! ## Usage
//!
//! ```bash
//! scl --config ./config/scl.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scl images [QUERY]` | Search images and cluster them by alt description |
//! | `scl news [QUERY]` | Search news articles and cluster them by content |
//! | `scl sources` | Show configured search APIs and credential status |
//!
//! ## Examples
//!
//! ```bash
//! # 20 images about mountains in 4 clusters, reproducible
//! scl images mountains --per-page 20 --clusters 4 --seed 7
//!
//! # News about food as JSON
//! scl news food --clusters 5 --format json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use search_cluster::config::{self, Config};
use search_cluster::connector_images::ImageSource;
use search_cluster::connector_news::NewsSource;
use search_cluster::kmeans::KMeansParams;
use search_cluster::pipeline::{self, OutputFormat, RunRequest};
use search_cluster::progress::ProgressMode;
use search_cluster::sources;

/// search-cluster: group image or news search results by topic using
/// TF-IDF and k-means.
#[derive(Parser)]
#[command(
    name = "scl",
    about = "Fetch images or news articles and cluster them by topic",
    version,
    long_about = "Fetches one page of results from an image or news search API, \
    vectorizes each result's text with TF-IDF, groups the vectors with k-means, \
    and prints each cluster as a grid. API keys are read from environment variables \
    named in the configuration (UNSPLASH_ACCESS_KEY and NEWSAPI_KEY by default)."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/scl.toml`. If no file exists at the default
    /// path, built-in defaults are used.
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Stage progress on stderr. Defaults to `human` on a TTY, else `off`.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search images and cluster them by their alt descriptions.
    Images {
        /// Search query.
        #[arg(default_value = "nature")]
        query: String,

        /// Number of images to fetch (1-50). Overrides `images.per_page`.
        #[arg(long)]
        per_page: Option<u32>,

        #[command(flatten)]
        clustering: ClusteringArgs,
    },

    /// Search news articles and cluster them by content.
    News {
        /// Search query.
        #[arg(default_value = "food")]
        query: String,

        /// Number of articles to fetch (1-100). Overrides `news.page_size`.
        #[arg(long)]
        page_size: Option<u32>,

        /// Comma-separated news source ids. Overrides `news.sources`.
        #[arg(long)]
        sources: Option<String>,

        /// Article language. Overrides `news.language`.
        #[arg(long)]
        language: Option<String>,

        #[command(flatten)]
        clustering: ClusteringArgs,
    },

    /// List configured search sources and whether their credentials are set.
    Sources,
}

#[derive(clap::Args)]
struct ClusteringArgs {
    /// Number of clusters (2-10). Overrides `clustering.num_clusters`.
    #[arg(long)]
    clusters: Option<usize>,

    /// Fix the k-means random seed for reproducible clusters.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format for the clustered results.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn build_request(
    cfg: &Config,
    query: String,
    limit: u32,
    args: ClusteringArgs,
) -> anyhow::Result<RunRequest> {
    let num_clusters = args.clusters.unwrap_or(cfg.clustering.num_clusters);
    config::validate_num_clusters(num_clusters)?;

    let mut params = KMeansParams::from(&cfg.clustering);
    if args.seed.is_some() {
        params.seed = args.seed;
    }

    Ok(RunRequest {
        query,
        limit,
        num_clusters,
        params,
        format: args.format,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config(&cli.config)?;
    let progress = cli
        .progress
        .unwrap_or_else(ProgressMode::default_for_tty)
        .reporter();

    match cli.command {
        Commands::Images {
            query,
            per_page,
            clustering,
        } => {
            let limit = per_page.unwrap_or(cfg.images.per_page);
            config::validate_per_page(limit)?;
            let request = build_request(&cfg, query, limit, clustering)?;
            let source = ImageSource::new(&cfg)?;
            pipeline::run(&source, &request, progress.as_ref()).await?;
        }
        Commands::News {
            query,
            page_size,
            sources,
            language,
            clustering,
        } => {
            if sources.is_some() {
                cfg.news.sources = sources;
            }
            if let Some(language) = language {
                cfg.news.language = language;
            }
            let limit = page_size.unwrap_or(cfg.news.page_size);
            config::validate_page_size(limit)?;
            let request = build_request(&cfg, query, limit, clustering)?;
            let source = NewsSource::new(&cfg)?;
            pipeline::run(&source, &request, progress.as_ref()).await?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
    }

    Ok(())
}
