use async_trait::async_trait;

use crate::model::{DetailRecord, Episode, SearchResult};

mod api;
pub(crate) mod fields;
mod html;

pub use api::ApiExtractor;
pub use html::HtmlExtractor;

/// The four-operation contract both extraction backends implement.
///
/// `input` carries a page reference (URL) for [`ApiExtractor`] and the raw
/// pre-fetched HTML document for [`HtmlExtractor`]; for `search` the API
/// backend takes the keyword while the HTML backend takes the results page.
///
/// Every method returns an already-degraded value: failures are caught at
/// the operation boundary and converted to the documented default (empty
/// sequence, absent value, or sentinel-filled record). Callers can pass
/// arbitrary or malformed input and always get a well-formed result.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Searches the catalog. At most `max_results` items, each with a
    /// non-empty title and href.
    async fn search(&self, input: &str) -> Vec<SearchResult>;

    /// Detail metadata for one entry; a Vec of length 0 or 1.
    async fn details(&self, input: &str) -> Vec<DetailRecord>;

    /// Playable episodes in document order; empty when unresolvable.
    async fn episodes(&self, input: &str) -> Vec<Episode>;

    /// URL of the playable stream, or `None` when no stream was found.
    async fn resolve_stream(&self, input: &str) -> Option<String>;
}
