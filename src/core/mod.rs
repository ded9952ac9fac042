//! Core building blocks shared by the rest of the crate:
//! the outbound HTTP client and the primary error type.

pub mod client;
pub mod error;

pub use client::{NewsClient, NewsClientBuilder};
pub use error::NewsError;
