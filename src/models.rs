//! Core data models used throughout the clustering pipeline.
//!
//! Items flow from a search source through vectorization and k-means into
//! [`ClusterGroups`], which the presenter renders.

use serde::Serialize;

/// Which search API an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Image,
    Article,
}

impl ItemKind {
    /// Plural noun used in user-facing messages.
    pub fn plural(&self) -> &'static str {
        match self {
            ItemKind::Image => "images",
            ItemKind::Article => "articles",
        }
    }

    /// Number of grid columns used when presenting items of this kind.
    pub fn columns(&self) -> usize {
        match self {
            ItemKind::Image => 4,
            ItemKind::Article => 3,
        }
    }
}

/// What the presenter shows for an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Display {
    Image { url: String, caption: String },
    Text { body: String },
}

/// A single fetched result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Text used for clustering.
    pub text: String,
    pub display: Display,
}

impl Item {
    pub fn image(alt_description: String, url: String) -> Self {
        Self {
            display: Display::Image {
                url,
                caption: alt_description.clone(),
            },
            text: alt_description,
        }
    }

    pub fn article(content: String) -> Self {
        Self {
            display: Display::Text {
                body: content.clone(),
            },
            text: content,
        }
    }
}

/// Per-item cluster labels produced by k-means.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    /// `labels[i]` is the cluster of corpus item `i`.
    pub labels: Vec<usize>,
    pub num_clusters: usize,
    /// Sum of squared distances to the assigned centroids.
    pub inertia: f32,
    pub iterations: usize,
}

/// One cluster's members, in corpus order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterGroup {
    pub id: usize,
    pub items: Vec<Item>,
}

/// All `K` clusters, indexed by cluster id. Empty clusters are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterGroups {
    pub kind: ItemKind,
    pub groups: Vec<ClusterGroup>,
}

impl ClusterGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all clusters.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
