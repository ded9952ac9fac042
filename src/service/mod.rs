//! Process-scoped service owning the cache store, the HTTP client, and the
//! periodic refresh task.
//!
//! One `NewsService` is constructed at startup and injected into the HTTP
//! layer; there is no ambient global state. Queries re-read the snapshot
//! store every time, so the store is the single source of truth and the
//! only place staleness is resolved.

mod refresh;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::article::{self, Article};
use crate::core::{NewsClient, NewsError};
use crate::listing::{self, Story};
use crate::store::SnapshotStore;

/// Tunables for the service. `Default` matches production behavior.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// How often the background refresh runs.
    pub refresh_interval: Duration,
    /// Where the snapshot file lives.
    pub snapshot_path: PathBuf,
    /// `/news` limit when the request does not specify one.
    pub default_limit: usize,
    /// Timeout for on-demand article fetches.
    pub article_timeout: Duration,
    /// Timeout for the listing fetch.
    pub listing_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            snapshot_path: PathBuf::from("latest_news.json"),
            default_limit: 50,
            article_timeout: Duration::from_secs(10),
            listing_timeout: Duration::from_secs(30),
        }
    }
}

impl ServiceConfig {
    /// Build a config from `NEWS_*` environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            refresh_interval: env_secs("NEWS_REFRESH_INTERVAL_SECS", defaults.refresh_interval),
            snapshot_path: std::env::var("NEWS_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            default_limit: std::env::var("NEWS_DEFAULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_limit),
            article_timeout: env_secs("NEWS_ARTICLE_TIMEOUT_SECS", defaults.article_timeout),
            listing_timeout: env_secs("NEWS_LISTING_TIMEOUT_SECS", defaults.listing_timeout),
        }
    }
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Owner of the fetch/extract/cache pipeline and its read API.
pub struct NewsService {
    client: NewsClient,
    store: SnapshotStore,
    config: ServiceConfig,
    scheduler: Mutex<Option<SchedulerHandle>>,
}

impl NewsService {
    /// Create a service over the given client and config.
    pub fn new(client: NewsClient, config: ServiceConfig) -> Self {
        let store = SnapshotStore::new(config.snapshot_path.clone());
        Self {
            client,
            store,
            config,
            scheduler: Mutex::new(None),
        }
    }

    /// The snapshot store backing this service.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run one refresh pass: fetch the listing, extract stories, and replace
    /// the snapshot.
    ///
    /// An empty extraction skips the write so a transient empty parse never
    /// overwrites a good snapshot; that case is a success, not an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying fetch or store failure.
    pub async fn refresh_now(&self) -> Result<(), NewsError> {
        let url = self.client.listing_url().clone();
        let body = self
            .client
            .fetch_text(&url, Some(self.config.listing_timeout))
            .await?;
        let stories = listing::extract_stories(&body);
        if stories.is_empty() {
            warn!("listing yielded no stories; keeping previous snapshot");
            return Ok(());
        }
        self.store.replace(&stories).await?;
        info!(count = stories.len(), "news snapshot updated");
        Ok(())
    }

    /// Run the initial refresh, then arm the periodic trigger.
    ///
    /// The first refresh is awaited so the cache is pre-warmed (best effort:
    /// a failure is logged, not fatal). Calling `start` while the scheduler
    /// is already armed is a no-op.
    pub async fn start(self: &Arc<Self>) {
        let mut guard = self.scheduler.lock().await;
        if guard.is_some() {
            warn!("refresh scheduler already running");
            return;
        }

        if let Err(e) = self.refresh_now().await {
            error!(error = %e, "initial news refresh failed");
        }

        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(refresh::run(Arc::clone(self), rx));
        *guard = Some(SchedulerHandle { shutdown, task });
        info!(interval = ?self.config.refresh_interval, "refresh scheduler started");
    }

    /// Disarm the periodic trigger and wait for the scheduler task to exit.
    pub async fn stop(&self) {
        let handle = self.scheduler.lock().await.take();
        if let Some(h) = handle {
            let _ = h.shutdown.send(true);
            if h.task.await.is_err() {
                error!("refresh scheduler task panicked");
            }
            info!("refresh scheduler stopped");
        }
    }

    /// Whether the periodic refresh task is currently armed.
    pub async fn scheduler_running(&self) -> bool {
        self.scheduler
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.task.is_finished())
    }

    /// Return at most `limit` stories in snapshot order.
    ///
    /// # Errors
    ///
    /// Propagates [`NewsError::NotReady`] and [`NewsError::Corrupt`] from
    /// the store.
    pub async fn list_latest(&self, limit: Option<usize>) -> Result<Vec<Story>, NewsError> {
        let mut stories = self.store.read().await?;
        stories.truncate(limit.unwrap_or(self.config.default_limit));
        Ok(stories)
    }

    /// Return the first story whose id matches.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::NotFound`] when no story matches, plus store
    /// read failures.
    pub async fn get_by_id(&self, id: &str) -> Result<Story, NewsError> {
        let stories = self.store.read().await?;
        stories
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| NewsError::NotFound(id.to_string()))
    }

    /// Fetch and extract the full article body for a cached story.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::IncompleteData`] when the story has no canonical
    /// URL (no network attempt is made), plus lookup and fetch failures.
    pub async fn get_article(&self, id: &str) -> Result<Article, NewsError> {
        let story = self.get_by_id(id).await?;
        let Some(canonical_url) = story.canonical_url else {
            return Err(NewsError::IncompleteData(id.to_string()));
        };
        let url = url::Url::parse(&canonical_url)?;
        let body = self
            .client
            .fetch_text(&url, Some(self.config.article_timeout))
            .await?;
        let paragraphs = article::extract_paragraphs(&body);
        Ok(Article {
            id: story.id,
            title: story.title,
            url: canonical_url,
            paragraph_count: paragraphs.len(),
            paragraphs,
        })
    }
}
