#![allow(dead_code)]

use std::{fs, path::PathBuf, sync::Arc};

use serde_json::{Value, json};
use tempfile::TempDir;
use yfnews::{NewsClient, NewsService, ServiceConfig, Story};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// Wrap an inner listing document the way the page embeds it: a fetched-JSON
/// script block whose `body` field is the string-encoded document.
pub fn data_block(inner: &Value) -> String {
    let payload = json!({ "status": 200, "body": inner.to_string() });
    format!(r#"<script type="application/json" data-sveltekit-fetched="true">{payload}</script>"#)
}

/// An inner document carrying `stream` at `data.main.stream`.
pub fn stream_doc(stream: Value) -> Value {
    json!({ "data": { "main": { "stream": stream } } })
}

/// A stream wrapper with the fields the extractor reads.
pub fn story_wrapper(id: &str, title: &str, url: &str, tickers: &[&str]) -> Value {
    let tickers: Vec<Value> = tickers.iter().map(|t| json!({ "symbol": t })).collect();
    json!({
        "content": {
            "id": id,
            "title": title,
            "pubDate": "2025-08-22T14:05:00.000Z",
            "canonicalUrl": { "url": url },
            "finance": { "stockTickers": tickers }
        }
    })
}

pub fn listing_page(blocks: &[String]) -> String {
    format!(
        "<!doctype html><html><head><title>Latest News</title></head><body><main>{}</main></body></html>",
        blocks.join("\n")
    )
}

/// A minimal story record for seeding the store directly.
pub fn story(id: &str) -> Story {
    Story {
        id: id.to_string(),
        title: Some(format!("title for {id}")),
        pub_date: None,
        canonical_url: None,
        stock_tickers: Vec::new(),
    }
}

/// A config whose snapshot lives inside `tmp`.
pub fn test_config(tmp: &TempDir) -> ServiceConfig {
    ServiceConfig {
        snapshot_path: tmp.path().join("latest_news.json"),
        ..ServiceConfig::default()
    }
}

/// A service whose listing fetches hit `listing_url` instead of Yahoo.
pub fn test_service(listing_url: &str, config: ServiceConfig) -> Arc<NewsService> {
    let client = NewsClient::builder()
        .listing_url(url::Url::parse(listing_url).unwrap())
        .build()
        .unwrap();
    Arc::new(NewsService::new(client, config))
}
