use async_trait::async_trait;
use log::debug;
use scraper::Html;

use crate::config::SiteConfig;
use crate::extractors::{fields, Extractor};
use crate::model::{DetailRecord, Episode, SearchResult};

/// Extraction backend over a pre-fetched HTML document.
///
/// Every operation takes the raw document as its input; there is no second
/// network round-trip, so the fallback chains lean looser than the API
/// backend's (any-iframe stream fallback, canonical-URL episode fallback).
pub struct HtmlExtractor {
    config: SiteConfig,
}

impl HtmlExtractor {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Extractor for HtmlExtractor {
    async fn search(&self, input: &str) -> Vec<SearchResult> {
        let document = Html::parse_document(input);
        let mut results = fields::search_items(&document);
        results.truncate(self.config.max_results);
        results
    }

    async fn details(&self, input: &str) -> Vec<DetailRecord> {
        let document = Html::parse_document(input);
        let description = fields::synopsis(&document).unwrap_or_default();
        let aliases = fields::original_title(&document).unwrap_or_default();
        let airdate = fields::air_date(&document).unwrap_or_default();

        // A record is only worth emitting when something was extracted;
        // the sentinels fill whatever is left
        if description.is_empty() && aliases.is_empty() && airdate.is_empty() {
            debug!("No detail fields found in document");
            return Vec::new();
        }
        vec![DetailRecord::from_fields(description, aliases, airdate)]
    }

    async fn episodes(&self, input: &str) -> Vec<Episode> {
        let document = Html::parse_document(input);
        let episodes = fields::episode_items(&document);
        if !episodes.is_empty() {
            return episodes;
        }
        // No episode list: treat the page as a single work anchored at its
        // canonical URL
        match fields::canonical_url(&document) {
            Some(href) => vec![Episode {
                href,
                number: "1".to_string(),
            }],
            None => {
                debug!("No episode list and no canonical URL, unresolvable");
                Vec::new()
            }
        }
    }

    async fn resolve_stream(&self, input: &str) -> Option<String> {
        let document = Html::parse_document(input);
        fields::marker_iframe_src(&document, &self.config.stream_marker).or_else(|| {
            debug!("No marker iframe, falling back to first iframe");
            fields::first_iframe_src(&document)
        })
    }
}
