//! Search source listing for `scl sources`.

use anyhow::Result;
use serde::Serialize;

use crate::config::{Config, SourceConfig};

/// Configuration and credential status of one search source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub endpoint: String,
    pub credential_env: String,
    pub credential_present: bool,
}

/// Collect the status of every configured search source.
pub fn get_sources(config: &Config) -> Vec<SourceStatus> {
    vec![
        status("images", &config.images),
        status("news", &config.news),
    ]
}

fn status(name: &str, source: &dyn SourceConfig) -> SourceStatus {
    SourceStatus {
        name: name.to_string(),
        endpoint: source.endpoint().to_string(),
        credential_env: source.credential_env().to_string(),
        credential_present: source.has_credential(),
    }
}

pub fn list_sources(config: &Config) -> Result<()> {
    println!(
        "{:<8} {:<24} {:<8} ENDPOINT",
        "SOURCE", "CREDENTIAL", "READY"
    );
    for s in get_sources(config) {
        println!(
            "{:<8} {:<24} {:<8} {}",
            s.name, s.credential_env, s.credential_present, s.endpoint
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_both_sources() {
        let mut cfg = Config::default();
        cfg.images.credential_env = "SCL_SOURCES_TEST_IMAGES".to_string();
        cfg.news.credential_env = "SCL_SOURCES_TEST_NEWS_UNSET".to_string();
        std::env::set_var("SCL_SOURCES_TEST_IMAGES", "key");

        let sources = get_sources(&cfg);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "images");
        assert!(sources[0].credential_present);
        assert_eq!(sources[1].name, "news");
        assert!(!sources[1].credential_present);
        assert_eq!(sources[1].endpoint, "https://newsapi.org/v2/everything");
    }
}
