use serde::Deserialize;

/// Outer payload of a `data-sveltekit-fetched` script block.
///
/// The interesting part is `body`: a complete JSON document encoded as a
/// string (the page double-encodes its fetch responses).
#[derive(Deserialize)]
pub(crate) struct FetchedPayload {
    pub(crate) body: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ListingEnvelope {
    pub(crate) data: Option<ListingData>,
}

#[derive(Deserialize)]
pub(crate) struct ListingData {
    pub(crate) main: Option<MainStream>,
}

#[derive(Deserialize)]
pub(crate) struct MainStream {
    pub(crate) stream: Option<Vec<StreamItem>>,
}

#[derive(Deserialize)]
pub(crate) struct StreamItem {
    pub(crate) content: Option<Content>,
}

#[derive(Deserialize)]
pub(crate) struct Content {
    pub(crate) id: Option<String>,
    pub(crate) title: Option<String>,
    #[serde(rename = "pubDate")]
    pub(crate) pub_date: Option<String>,
    #[serde(rename = "canonicalUrl")]
    pub(crate) canonical_url: Option<CanonicalUrl>,
    pub(crate) finance: Option<Finance>,
}

#[derive(Deserialize)]
pub(crate) struct CanonicalUrl {
    pub(crate) url: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct Finance {
    #[serde(rename = "stockTickers")]
    pub(crate) stock_tickers: Option<Vec<StockTicker>>,
}

#[derive(Deserialize)]
pub(crate) struct StockTicker {
    pub(crate) symbol: Option<String>,
}
