//! yfnews: self-hosted REST API for the Yahoo Finance latest-news feed.
//!
//! A background job scrapes the listing page on a fixed interval and caches
//! the extracted stories to a snapshot file; request handlers serve reads
//! from that snapshot and fetch full article text on demand.

pub mod article;
pub mod core;
pub mod listing;
pub mod server;
pub mod service;
pub mod store;

pub use article::Article;
pub use self::core::{NewsClient, NewsClientBuilder, NewsError};
pub use listing::Story;
pub use service::{NewsService, ServiceConfig};
pub use store::SnapshotStore;
