//! Metadata extraction for movie catalog sites.
//!
//! Two interchangeable backends implement the same four-operation contract:
//! [`ApiExtractor`] queries the site's JSON content API, [`HtmlExtractor`]
//! works on pre-fetched HTML documents. Every operation degrades to a safe
//! default instead of erroring, so hosts can call them on arbitrary input
//! and always get a well-formed result.

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod model;
pub mod normalize;

pub use builder::{Backend, CatalogExtractor, ExtractorBuilder};
pub use config::SiteConfig;
pub use error::ExtractError;
pub use extractors::{ApiExtractor, Extractor, HtmlExtractor};
pub use fetcher::{Fetcher, HttpFetcher};
pub use model::{DetailRecord, Episode, SearchResult};

/// Searches the catalog for a keyword with the default API backend.
pub async fn search(keyword: &str) -> Vec<SearchResult> {
    default_extractor().search(keyword).await
}

/// Fetches detail metadata for a page reference with the default API backend.
pub async fn details(reference: &str) -> Vec<DetailRecord> {
    default_extractor().details(reference).await
}

/// Enumerates episodes for a page reference with the default API backend.
pub async fn episodes(reference: &str) -> Vec<Episode> {
    default_extractor().episodes(reference).await
}

/// Resolves the playable stream URL for a page reference with the default
/// API backend.
pub async fn resolve_stream(reference: &str) -> Option<String> {
    default_extractor().resolve_stream(reference).await
}

fn default_extractor() -> ApiExtractor {
    ApiExtractor::new(SiteConfig::load_or_default())
}
