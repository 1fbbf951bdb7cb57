//! Image search connector (Unsplash-compatible).
//!
//! Issues `GET {endpoint}?query=…&per_page=…&client_id=…` and reads
//! `results[].alt_description` (clustering text and caption) and
//! `results[].urls.small` (display URL).

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::config::{Config, SourceConfig};
use crate::fetch::{http_client, records, required_str, SearchSource};
use crate::models::{Item, ItemKind};

pub struct ImageSource {
    endpoint: String,
    client_id: String,
    client: reqwest::Client,
}

impl ImageSource {
    /// Build the source from configuration.
    ///
    /// # Errors
    ///
    /// Fails when the credential environment variable is unset or blank.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: config.images.endpoint.clone(),
            client_id: config.images.credential()?,
            client: http_client(&config.http)?,
        })
    }
}

#[async_trait]
impl SearchSource for ImageSource {
    fn name(&self) -> &str {
        "images"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Image
    }

    async fn request(&self, query: &str, limit: u32) -> Result<Value> {
        let per_page = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    fn parse(&self, body: &Value) -> Result<Vec<Item>> {
        parse_results(body)
    }
}

/// Convert a search response into image items.
pub fn parse_results(body: &Value) -> Result<Vec<Item>> {
    records(body, "results")
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let alt = required_str(record, &["alt_description"], i)?;
            let url = required_str(record, &["urls", "small"], i)?;
            Ok(Item::image(alt.to_string(), url.to_string()))
        })
        .collect()
}
