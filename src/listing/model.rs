use serde::{Deserialize, Serialize};

/// A single story from the latest-news listing.
///
/// This is both the snapshot-file record and the `/news` response shape, so
/// the serde renames below fix the persisted JSON keys. Absent fields stay
/// `null` on the wire; only the ticker list degrades to an empty array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Upstream-assigned identifier; the primary key within a snapshot.
    pub id: String,
    /// Display headline.
    pub title: Option<String>,
    /// Source-provided publication timestamp, UTC.
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    /// Link to the full article; without it the article body is unreachable.
    #[serde(rename = "canonicalUrl")]
    pub canonical_url: Option<String>,
    /// Ticker symbols the story mentions. Empty when the source lists none.
    #[serde(rename = "stockTickers", default)]
    pub stock_tickers: Vec<String>,
}
