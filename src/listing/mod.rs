//! Listing-page scraping: the `Story` model, the wire shapes of the embedded
//! payload, and the pure extractor that turns listing HTML into stories.

mod extract;
mod model;
mod wire;

pub use extract::extract_stories;
pub use model::Story;
