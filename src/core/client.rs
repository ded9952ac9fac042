//! Outbound HTTP client + builder.
//!
//! One `reqwest` client is shared by the listing refresh and article fetches.
//! Yahoo and many article hosts reject or alter responses for unidentified or
//! non-English-preferring clients, so both headers below are fixed defaults.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use url::Url;

use crate::core::NewsError;

/// Default desktop UA to avoid trivial bot blocking.
const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/139.0.0.0 Safari/537.36"
);

/// English-preferring Accept-Language sent with every request.
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// The latest-news listing page whose embedded data feeds the cache.
const DEFAULT_LISTING_URL: &str = "https://finance.yahoo.com/topic/latest-news/";

/// HTTP client for the listing page and for article pages.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    listing_url: Url,
}

impl Default for NewsClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl NewsClient {
    /// Create a new builder.
    pub fn builder() -> NewsClientBuilder {
        NewsClientBuilder::default()
    }

    /// The listing page URL this client refreshes from.
    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    /// Issue a GET and return the response body text.
    ///
    /// `timeout` overrides the client-wide default for this one request
    /// (article fetches use a tighter bound than the listing fetch).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Status`] on a non-2xx response and
    /// [`NewsError::Http`] on connection failure, timeout, or a body read
    /// error.
    pub async fn fetch_text(
        &self,
        url: &Url,
        timeout: Option<Duration>,
    ) -> Result<String, NewsError> {
        let mut req = self.http.get(url.clone());
        if let Some(t) = timeout {
            req = req.timeout(t);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(NewsError::Status {
                status: resp.status().as_u16(),
                url: resp.url().to_string(),
            });
        }
        Ok(resp.text().await?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct NewsClientBuilder {
    user_agent: Option<String>,
    listing_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl NewsClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the listing page URL (points tests at a mock server).
    #[must_use]
    pub fn listing_url(mut self, url: Url) -> Self {
        self.listing_url = Some(url);
        self
    }

    /// Set a client-wide request timeout. Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the default listing URL fails to parse or the
    /// underlying `reqwest` client cannot be constructed.
    pub fn build(self) -> Result<NewsClient, NewsError> {
        let listing_url = match self.listing_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_LISTING_URL)?,
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
        );

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .default_headers(headers);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(NewsClient {
            http: httpb.build()?,
            listing_url,
        })
    }
}
