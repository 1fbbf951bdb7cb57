//! Search source abstraction and the fail-soft fetch entry point.
//!
//! A [`SearchSource`] splits a fetch into two halves:
//!
//! - [`request`](SearchSource::request) performs the single HTTP GET and
//!   decodes the JSON body. Any failure here is a transport failure.
//! - [`parse`](SearchSource::parse) turns the body into [`Item`]s. A record
//!   missing its text field is a validation failure.
//!
//! [`fetch_items`] reports transport failures on stderr and degrades to an
//! empty corpus, while validation failures are returned to the caller.
//!
//! # Example
//!
//! ```rust
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use search_cluster::fetch::SearchSource;
//! use search_cluster::models::{Item, ItemKind};
//! use serde_json::{json, Value};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl SearchSource for Canned {
//!     fn name(&self) -> &str { "canned" }
//!     fn kind(&self) -> ItemKind { ItemKind::Article }
//!
//!     async fn request(&self, _query: &str, _limit: u32) -> Result<Value> {
//!         Ok(json!({ "articles": [{ "content": "hello world" }] }))
//!     }
//!
//!     fn parse(&self, body: &Value) -> Result<Vec<Item>> {
//!         Ok(vec![Item::article(body["articles"][0]["content"].to_string())])
//!     }
//! }
//! ```

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::models::{Item, ItemKind};

/// A search API that yields an ordered list of items for a query.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Short identifier used in messages (e.g. `"unsplash"`).
    fn name(&self) -> &str;

    /// The kind of item this source produces.
    fn kind(&self) -> ItemKind;

    /// Issue one request for at most `limit` results and return the
    /// decoded JSON body. Non-2xx statuses are errors.
    async fn request(&self, query: &str, limit: u32) -> Result<Value>;

    /// Convert a response body into items, preserving response order.
    fn parse(&self, body: &Value) -> Result<Vec<Item>>;
}

/// Build the HTTP client shared by the search sources.
pub fn http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// Fetch items for `query`, degrading transport failures to no results.
///
/// # Errors
///
/// Returns an error only when `limit` is zero or the response contains a
/// malformed record.
pub async fn fetch_items(source: &dyn SearchSource, query: &str, limit: u32) -> Result<Vec<Item>> {
    if limit == 0 {
        bail!("result limit must be a positive integer");
    }

    let body = match source.request(query, limit).await {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Error fetching {}: {:#}", source.kind().plural(), e);
            return Ok(Vec::new());
        }
    };

    source.parse(&body)
}

/// Read a required string field from a response record.
pub(crate) fn required_str<'a>(
    record: &'a Value,
    path: &[&str],
    index: usize,
) -> Result<&'a str> {
    let mut cur = record;
    for key in path {
        cur = match cur.get(key) {
            Some(v) => v,
            None => bail!("record {} is missing '{}'", index, path.join(".")),
        };
    }
    match cur.as_str() {
        Some(s) => Ok(s),
        None => bail!(
            "record {} has no string value for '{}'",
            index,
            path.join(".")
        ),
    }
}

/// Return the array under `key`, or an empty slice when it is absent.
pub(crate) fn records<'a>(body: &'a Value, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(|v| v.as_array())
        .map(|a| a.as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingSource;

    #[async_trait]
    impl SearchSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }
        fn kind(&self) -> ItemKind {
            ItemKind::Image
        }
        async fn request(&self, _query: &str, _limit: u32) -> Result<Value> {
            bail!("operation timed out")
        }
        fn parse(&self, _body: &Value) -> Result<Vec<Item>> {
            unreachable!("parse must not run after a failed request")
        }
    }

    struct StaticSource(Value);

    #[async_trait]
    impl SearchSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }
        fn kind(&self) -> ItemKind {
            ItemKind::Article
        }
        async fn request(&self, _query: &str, _limit: u32) -> Result<Value> {
            Ok(self.0.clone())
        }
        fn parse(&self, body: &Value) -> Result<Vec<Item>> {
            records(body, "articles")
                .iter()
                .enumerate()
                .map(|(i, r)| Ok(Item::article(required_str(r, &["content"], i)?.to_string())))
                .collect()
        }
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty() {
        let items = fetch_items(&FailingSource, "nature", 10).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_zero_limit_rejected() {
        assert!(fetch_items(&FailingSource, "nature", 0).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_record_is_error() {
        let source = StaticSource(json!({ "articles": [{ "content": "ok" }, { "title": "x" }] }));
        let err = fetch_items(&source, "food", 5).await.unwrap_err();
        assert!(err.to_string().contains("record 1"), "{}", err);
    }

    #[tokio::test]
    async fn test_parse_preserves_order() {
        let source = StaticSource(json!({
            "articles": [{ "content": "first" }, { "content": "second" }]
        }));
        let items = fetch_items(&source, "food", 5).await.unwrap();
        assert_eq!(items[0].text, "first");
        assert_eq!(items[1].text, "second");
    }

    #[test]
    fn test_required_str_nested_and_null() {
        let rec = json!({ "urls": { "small": "http://x" }, "alt_description": null });
        assert_eq!(required_str(&rec, &["urls", "small"], 0).unwrap(), "http://x");
        assert!(required_str(&rec, &["alt_description"], 0).is_err());
        assert!(required_str(&rec, &["urls", "large"], 0).is_err());
    }

    #[test]
    fn test_records_missing_key() {
        assert!(records(&json!({}), "results").is_empty());
        assert!(records(&json!({ "results": null }), "results").is_empty());
    }
}
