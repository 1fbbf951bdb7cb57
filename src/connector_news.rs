//! News article connector (NewsAPI-compatible).
//!
//! Issues `GET {endpoint}?q=…&sources=…&language=…&pageSize=…&apiKey=…`
//! and reads `articles[].content`. `sources` is only sent when configured.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::config::{Config, SourceConfig};
use crate::fetch::{http_client, records, required_str, SearchSource};
use crate::models::{Item, ItemKind};

pub struct NewsSource {
    endpoint: String,
    api_key: String,
    language: String,
    sources: Option<String>,
    client: reqwest::Client,
}

impl NewsSource {
    /// Build the source from configuration.
    ///
    /// # Errors
    ///
    /// Fails when the credential environment variable is unset or blank.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: config.news.endpoint.clone(),
            api_key: config.news.credential()?,
            language: config.news.language.clone(),
            sources: config.news.sources.clone(),
            client: http_client(&config.http)?,
        })
    }

    fn query_params<'a>(&'a self, query: &'a str, page_size: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![("q", query)];
        if let Some(ref sources) = self.sources {
            params.push(("sources", sources.as_str()));
        }
        params.push(("language", self.language.as_str()));
        params.push(("pageSize", page_size));
        params.push(("apiKey", self.api_key.as_str()));
        params
    }
}

#[async_trait]
impl SearchSource for NewsSource {
    fn name(&self) -> &str {
        "news"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Article
    }

    async fn request(&self, query: &str, limit: u32) -> Result<Value> {
        let page_size = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(query, &page_size))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    fn parse(&self, body: &Value) -> Result<Vec<Item>> {
        parse_articles(body)
    }
}

/// Convert a news response into article items.
pub fn parse_articles(body: &Value) -> Result<Vec<Item>> {
    records(body, "articles")
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let content = required_str(record, &["content"], i)?;
            Ok(Item::article(content.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewsConfig;
    use serde_json::json;

    fn source(sources: Option<&str>) -> NewsSource {
        NewsSource {
            endpoint: NewsConfig::default().endpoint,
            api_key: "k".to_string(),
            language: "en".to_string(),
            sources: sources.map(str::to_string),
            client: reqwest::Client::new(),
        }
    }

    #[test]
    fn test_parse_articles() {
        let body = json!({
            "status": "ok",
            "articles": [
                { "title": "a", "content": "Pasta recipes for winter" },
                { "title": "b", "content": "Street food festival" }
            ]
        });
        let items = parse_articles(&body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "Street food festival");
    }

    #[test]
    fn test_null_content_is_error() {
        let body = json!({ "articles": [{ "title": "a", "content": null }] });
        assert!(parse_articles(&body).is_err());
    }

    #[test]
    fn test_sources_param_only_when_set() {
        let without = source(None);
        let params = without.query_params("food", "100");
        assert!(!params.iter().any(|(k, _)| *k == "sources"));
        assert!(params.contains(&("pageSize", "100")));
        assert!(params.contains(&("language", "en")));

        let with = source(Some("bbc-news"));
        assert!(with
            .query_params("food", "100")
            .contains(&("sources", "bbc-news")));
    }
}
