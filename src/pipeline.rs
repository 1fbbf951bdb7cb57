//! Fetch → vectorize → cluster → group → present.
//!
//! [`cluster_corpus`] is the pure core: it takes an already-fetched corpus
//! and decides whether clustering can happen at all. [`run`] wires it to a
//! [`SearchSource`] and prints the result in the requested format.

use anyhow::Result;
use serde::Serialize;

use crate::fetch::{fetch_items, SearchSource};
use crate::group::group_by_cluster;
use crate::kmeans::{self, KMeansParams};
use crate::models::{ClusterGroups, Item, ItemKind};
use crate::present::render_text;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::tfidf;

/// How results are written to stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The source returned nothing (or failed).
    NoResults,
    /// Fewer items than requested clusters; clustering was skipped.
    TooFewItems { found: usize, clusters: usize },
    Clustered(ClusterGroups),
}

/// Parameters for one invocation.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub query: String,
    pub limit: u32,
    pub num_clusters: usize,
    pub params: KMeansParams,
    pub format: OutputFormat,
}

/// Vectorize and cluster `corpus` into `num_clusters` groups.
///
/// Returns [`PipelineOutcome::NoResults`] for an empty corpus and
/// [`PipelineOutcome::TooFewItems`] when there are fewer items than
/// clusters; k-means is not invoked in either case.
pub fn cluster_corpus(
    kind: ItemKind,
    corpus: &[Item],
    num_clusters: usize,
    params: &KMeansParams,
    progress: &dyn ProgressReporter,
) -> Result<PipelineOutcome> {
    if corpus.is_empty() {
        return Ok(PipelineOutcome::NoResults);
    }
    if corpus.len() < num_clusters {
        return Ok(PipelineOutcome::TooFewItems {
            found: corpus.len(),
            clusters: num_clusters,
        });
    }

    progress.report(ProgressEvent::Vectorizing {
        items: corpus.len(),
    });
    let texts: Vec<String> = corpus.iter().map(|item| item.text.clone()).collect();
    let features = tfidf::fit_transform(&texts)?;

    progress.report(ProgressEvent::Clustering {
        items: corpus.len(),
        clusters: num_clusters,
    });
    let assignment = kmeans::fit(&features.values, num_clusters, params)?;
    progress.report(ProgressEvent::Done {
        clusters: num_clusters,
        iterations: assignment.iterations,
        inertia: assignment.inertia,
    });

    Ok(PipelineOutcome::Clustered(group_by_cluster(
        kind,
        corpus,
        &assignment,
    )?))
}

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub query: &'a str,
    pub kind: ItemKind,
    pub found: usize,
    pub num_clusters: usize,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<&'a ClusterGroups>,
}

impl<'a> RunReport<'a> {
    pub fn new(
        request: &'a RunRequest,
        kind: ItemKind,
        found: usize,
        outcome: &'a PipelineOutcome,
    ) -> Self {
        let (status, clusters) = match outcome {
            PipelineOutcome::NoResults => ("no_results", None),
            PipelineOutcome::TooFewItems { .. } => ("too_few_items", None),
            PipelineOutcome::Clustered(groups) => ("clustered", Some(groups)),
        };
        Self {
            query: &request.query,
            kind,
            found,
            num_clusters: request.num_clusters,
            status,
            clusters,
        }
    }
}

/// Fetch from `source`, cluster, and print the outcome.
pub async fn run(
    source: &dyn SearchSource,
    request: &RunRequest,
    progress: &dyn ProgressReporter,
) -> Result<PipelineOutcome> {
    let kind = source.kind();

    progress.report(ProgressEvent::Fetching {
        source: source.name().to_string(),
        query: request.query.clone(),
    });
    let corpus = fetch_items(source, &request.query, request.limit).await?;

    if request.format == OutputFormat::Text && !corpus.is_empty() {
        println!(
            "Found {} {} for '{}'. They are clustered below.",
            corpus.len(),
            kind.plural(),
            request.query
        );
        println!();
    }

    let outcome = cluster_corpus(
        kind,
        &corpus,
        request.num_clusters,
        &request.params,
        progress,
    )?;

    match &outcome {
        PipelineOutcome::NoResults => {
            if request.format == OutputFormat::Text {
                println!("No {} found.", kind.plural());
            }
        }
        PipelineOutcome::TooFewItems { .. } => {
            eprintln!(
                "Warning: Number of clusters cannot exceed the number of {}.",
                kind.plural()
            );
        }
        PipelineOutcome::Clustered(groups) => {
            if request.format == OutputFormat::Text {
                print!("{}", render_text(groups));
            }
        }
    }

    if request.format == OutputFormat::Json {
        let report = RunReport::new(request, kind, corpus.len(), &outcome);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(outcome)
}
