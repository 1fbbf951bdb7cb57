//! Pipeline progress reporting.
//!
//! Reports which stage a run is in so users see what is happening while
//! the request is in flight. Progress is emitted on **stderr** so stdout
//! (the rendered clusters, or JSON) stays parseable for scripts.

use std::io::Write;

/// A single progress event.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// Waiting on the search API.
    Fetching { source: String, query: String },
    /// Building the TF-IDF matrix for `items` texts.
    Vectorizing { items: usize },
    /// Running k-means.
    Clustering { items: usize, clusters: usize },
    /// Clustering finished.
    Done {
        clusters: usize,
        iterations: usize,
        inertia: f32,
    },
}

/// Reports pipeline progress. Implementations write to stderr.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Human-friendly progress on stderr: "clustering  10 items into 5 clusters".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ProgressEvent) {
        let line = match &event {
            ProgressEvent::Fetching { source, query } => {
                format!("fetching  {} for '{}'...\n", source, query)
            }
            ProgressEvent::Vectorizing { items } => {
                format!("vectorizing  {} items\n", items)
            }
            ProgressEvent::Clustering { items, clusters } => {
                format!("clustering  {} items into {} clusters\n", items, clusters)
            }
            ProgressEvent::Done {
                clusters,
                iterations,
                inertia,
            } => format!(
                "done  {} clusters after {} iterations (inertia {:.4})\n",
                clusters, iterations, inertia
            ),
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let obj = match &event {
            ProgressEvent::Fetching { source, query } => serde_json::json!({
                "event": "progress",
                "stage": "fetching",
                "source": source,
                "query": query
            }),
            ProgressEvent::Vectorizing { items } => serde_json::json!({
                "event": "progress",
                "stage": "vectorizing",
                "items": items
            }),
            ProgressEvent::Clustering { items, clusters } => serde_json::json!({
                "event": "progress",
                "stage": "clustering",
                "items": items,
                "clusters": clusters
            }),
            ProgressEvent::Done {
                clusters,
                iterations,
                inertia,
            } => serde_json::json!({
                "event": "progress",
                "stage": "done",
                "clusters": clusters,
                "iterations": iterations,
                "inertia": inertia
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
