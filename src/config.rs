//! TOML configuration.
//!
//! Every section has defaults, so an empty file (or no file at the default
//! path) is a valid configuration. API credentials are never stored here:
//! each source names the environment variable that holds its key, and
//! [`SourceConfig::credential`] reads it when a command actually needs it.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config/scl.toml";

/// Largest page the image API serves in one request.
pub const MAX_PER_PAGE: u32 = 50;
/// Largest page the news API serves in one request.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Allowed range for the cluster count.
pub const MIN_CLUSTERS: usize = 2;
pub const MAX_CLUSTERS: usize = 10;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Endpoint and credential lookup shared by both search sources.
pub trait SourceConfig {
    fn endpoint(&self) -> &str;
    fn credential_env(&self) -> &str;

    /// Read the API credential from the environment.
    ///
    /// Fails when the variable is unset or blank.
    fn credential(&self) -> Result<String> {
        let var = self.credential_env();
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            Ok(_) => bail!("{} environment variable is empty", var),
            Err(_) => bail!("{} environment variable not set", var),
        }
    }

    fn has_credential(&self) -> bool {
        self.credential().is_ok()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    #[serde(default = "default_images_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_images_credential_env")]
    pub credential_env: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_images_endpoint(),
            credential_env: default_images_credential_env(),
            per_page: default_per_page(),
        }
    }
}

impl SourceConfig for ImagesConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }
    fn credential_env(&self) -> &str {
        &self.credential_env
    }
}

fn default_images_endpoint() -> String {
    "https://api.unsplash.com/search/photos".to_string()
}
fn default_images_credential_env() -> String {
    "UNSPLASH_ACCESS_KEY".to_string()
}
fn default_per_page() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsConfig {
    #[serde(default = "default_news_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_news_credential_env")]
    pub credential_env: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub sources: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_news_endpoint(),
            credential_env: default_news_credential_env(),
            language: default_language(),
            sources: None,
            page_size: default_page_size(),
        }
    }
}

impl SourceConfig for NewsConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }
    fn credential_env(&self) -> &str {
        &self.credential_env
    }
}

fn default_news_endpoint() -> String {
    "https://newsapi.org/v2/everything".to_string()
}
fn default_news_credential_env() -> String {
    "NEWSAPI_KEY".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_page_size() -> u32 {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClusteringConfig {
    #[serde(default = "default_num_clusters")]
    pub num_clusters: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    #[serde(default = "default_n_init")]
    pub n_init: usize,
    /// Fixed RNG seed. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            num_clusters: default_num_clusters(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            n_init: default_n_init(),
            seed: None,
        }
    }
}

fn default_num_clusters() -> usize {
    5
}
fn default_max_iterations() -> usize {
    300
}
fn default_tolerance() -> f32 {
    1e-4
}
fn default_n_init() -> usize {
    10
}

/// Load and validate the configuration at `path`.
///
/// When `path` is the default location and no file exists there, the
/// built-in defaults are returned. An explicitly named file must exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.http.timeout_secs == 0 {
        bail!("http.timeout_secs must be > 0");
    }

    if config.images.endpoint.trim().is_empty() {
        bail!("images.endpoint must not be empty");
    }
    if config.news.endpoint.trim().is_empty() {
        bail!("news.endpoint must not be empty");
    }

    validate_per_page(config.images.per_page)?;
    validate_page_size(config.news.page_size)?;
    validate_num_clusters(config.clustering.num_clusters)?;

    if config.clustering.max_iterations == 0 {
        bail!("clustering.max_iterations must be >= 1");
    }
    if config.clustering.n_init == 0 {
        bail!("clustering.n_init must be >= 1");
    }
    if config.clustering.tolerance.is_nan() || config.clustering.tolerance < 0.0 {
        bail!("clustering.tolerance must be >= 0.0");
    }

    Ok(())
}

pub fn validate_per_page(per_page: u32) -> Result<()> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        bail!("per_page must be in [1, {}], got {}", MAX_PER_PAGE, per_page);
    }
    Ok(())
}

pub fn validate_page_size(page_size: u32) -> Result<()> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        bail!(
            "page_size must be in [1, {}], got {}",
            MAX_PAGE_SIZE,
            page_size
        );
    }
    Ok(())
}

pub fn validate_num_clusters(num_clusters: usize) -> Result<()> {
    if !(MIN_CLUSTERS..=MAX_CLUSTERS).contains(&num_clusters) {
        bail!(
            "number of clusters must be in [{}, {}], got {}",
            MIN_CLUSTERS,
            MAX_CLUSTERS,
            num_clusters
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.http.timeout_secs, 30);
        assert_eq!(cfg.images.per_page, 10);
        assert_eq!(cfg.news.page_size, 100);
        assert_eq!(cfg.news.language, "en");
        assert!(cfg.news.sources.is_none());
        assert_eq!(cfg.clustering.num_clusters, 5);
        assert_eq!(cfg.clustering.n_init, 10);
        assert!(cfg.clustering.seed.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
[images]
per_page = 25

[clustering]
num_clusters = 3
seed = 7
"#,
        )
        .unwrap();
        assert_eq!(cfg.images.per_page, 25);
        assert_eq!(cfg.images.credential_env, "UNSPLASH_ACCESS_KEY");
        assert_eq!(cfg.clustering.num_clusters, 3);
        assert_eq!(cfg.clustering.seed, Some(7));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(parse_config("[images]\nper_page = 0").is_err());
        assert!(parse_config("[images]\nper_page = 51").is_err());
        assert!(parse_config("[news]\npage_size = 101").is_err());
        assert!(parse_config("[clustering]\nnum_clusters = 1").is_err());
        assert!(parse_config("[clustering]\nnum_clusters = 11").is_err());
        assert!(parse_config("[clustering]\nn_init = 0").is_err());
        assert!(parse_config("[http]\ntimeout_secs = 0").is_err());
        assert!(parse_config("[images]\nendpoint = \"  \"").is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let missing = Path::new("/nonexistent/dir/scl.toml");
        assert!(load_config(missing).is_err());
    }

    #[test]
    fn test_credential_from_env() {
        let images = ImagesConfig {
            credential_env: "SCL_TEST_CREDENTIAL_PRESENT".to_string(),
            ..ImagesConfig::default()
        };
        std::env::set_var("SCL_TEST_CREDENTIAL_PRESENT", "abc123");
        assert_eq!(images.credential().unwrap(), "abc123");

        let blank = ImagesConfig {
            credential_env: "SCL_TEST_CREDENTIAL_BLANK".to_string(),
            ..ImagesConfig::default()
        };
        std::env::set_var("SCL_TEST_CREDENTIAL_BLANK", "   ");
        assert!(blank.credential().is_err());

        let unset = NewsConfig {
            credential_env: "SCL_TEST_CREDENTIAL_UNSET".to_string(),
            ..NewsConfig::default()
        };
        let err = unset.credential().unwrap_err().to_string();
        assert!(err.contains("SCL_TEST_CREDENTIAL_UNSET"));
        assert!(!unset.has_credential());
    }
}
