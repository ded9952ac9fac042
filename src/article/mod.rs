//! On-demand article body extraction.

use scraper::{Html, Selector};
use serde::Serialize;

/// Full article text assembled for one story.
///
/// Built fresh per request from the story's canonical URL; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: String,
    pub title: Option<String>,
    pub url: String,
    pub paragraph_count: usize,
    pub paragraphs: Vec<String>,
}

/// Collect the text of every `<p>` element in document order, tags stripped.
///
/// No filtering: textually empty paragraphs stay in the list so the count
/// mirrors the page structure.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("p").expect("valid selector");
    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect()
}
