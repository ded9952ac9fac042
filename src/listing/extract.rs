//! Extract the story stream embedded in the latest-news listing page.

use scraper::{Html, Selector};
use tracing::debug;

use super::{model::Story, wire};

/// Script blocks carrying the page's fetched JSON payloads.
const DATA_BLOCK_SELECTOR: &str = r#"script[type="application/json"][data-sveltekit-fetched]"#;

/// Pull the ordered story list out of raw listing HTML.
///
/// The page embeds its data as fetched-JSON script blocks whose `body` field
/// is a second, string-encoded JSON document. Several blocks repeat the same
/// structure; the first one carrying a non-empty `data.main.stream` is
/// canonical and scanning stops there.
///
/// Malformed blocks are skipped. When no block yields a usable stream the
/// result is an empty list, never an error, so the caller can decide whether
/// an empty parse should overwrite a good snapshot.
pub fn extract_stories(html: &str) -> Vec<Story> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(DATA_BLOCK_SELECTOR).expect("valid selector");

    for block in document.select(&selector) {
        let raw = block.text().collect::<String>();
        let payload: wire::FetchedPayload = match serde_json::from_str(&raw) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "skipping unparseable data block");
                continue;
            }
        };
        let Some(body) = payload.body else { continue };
        if !body.starts_with('{') {
            continue;
        }
        let envelope: wire::ListingEnvelope = match serde_json::from_str(&body) {
            Ok(env) => env,
            Err(e) => {
                debug!(error = %e, "skipping data block with unparseable body");
                continue;
            }
        };
        let stream = envelope
            .data
            .and_then(|d| d.main)
            .and_then(|m| m.stream)
            .unwrap_or_default();
        if stream.is_empty() {
            continue;
        }
        return stream.into_iter().filter_map(story_from_wire).collect();
    }

    debug!("no data block yielded a story stream");
    Vec::new()
}

fn story_from_wire(item: wire::StreamItem) -> Option<Story> {
    let content = item.content?;
    // A record without an id is unreachable through every read path.
    let id = content.id?;
    let stock_tickers = content
        .finance
        .and_then(|f| f.stock_tickers)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|t| t.symbol)
        .collect();
    Some(Story {
        id,
        title: content.title,
        pub_date: content.pub_date,
        canonical_url: content.canonical_url.and_then(|u| u.url),
        stock_tickers,
    })
}
