//! # search-cluster
//!
//! Fetch images or news articles from a search API and group them by
//! topic.
//!
//! Each item's short text (an image's alt description, or an article's
//! content) is turned into a TF-IDF vector, the vectors are partitioned
//! with k-means into a user-chosen number of clusters, and each cluster is
//! printed as a fixed-column grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────┐   ┌─────────┐   ┌──────────┐   ┌───────────┐
//! │ SearchSource│──▶│  TF-IDF  │──▶│ k-means │──▶│  Group   │──▶│ Presenter │
//! │ images/news │   │  matrix  │   │ labels  │   │ K buckets│   │ text/json │
//! └─────────────┘   └──────────┘   └─────────┘   └──────────┘   └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export UNSPLASH_ACCESS_KEY=...
//! scl images nature --per-page 20 --clusters 4
//!
//! export NEWSAPI_KEY=...
//! scl news food --clusters 5 --format json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and credential lookup |
//! | [`models`] | Core data types |
//! | [`fetch`] | Search source trait and fail-soft fetch |
//! | [`connector_images`] | Image search API |
//! | [`connector_news`] | News search API |
//! | [`tfidf`] | TF-IDF vectorization |
//! | [`kmeans`] | K-means clustering |
//! | [`group`] | Grouping items by cluster |
//! | [`present`] | Grid rendering |
//! | [`pipeline`] | End-to-end run |
//! | [`progress`] | Stage progress on stderr |
//! | [`sources`] | Source status listing |

pub mod config;
pub mod connector_images;
pub mod connector_news;
pub mod fetch;
pub mod group;
pub mod kmeans;
pub mod models;
pub mod pipeline;
pub mod present;
pub mod progress;
pub mod sources;
pub mod tfidf;
