use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use scraper::Html;
use serde::Deserialize;

use crate::config::SiteConfig;
use crate::error::ExtractError;
use crate::extractors::{fields, Extractor};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::model::{DetailRecord, Episode, SearchResult};
use crate::normalize::{slug_from_url, strip_markup, year_from_slug};

/// Extraction backend over the site's JSON content API.
///
/// Search hits come from the content-search endpoint and are augmented with
/// a poster scraped from each hit's page; details come from the
/// content-by-slug endpoint. The site hosts single works, so episode
/// enumeration is synthetic.
pub struct ApiExtractor {
    fetcher: Arc<dyn Fetcher>,
    config: SiteConfig,
}

/// One hit of the content-search endpoint.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
}

/// One post of the content-by-slug endpoint.
#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: Rendered,
    #[serde(default)]
    content: Rendered,
}

#[derive(Debug, Deserialize, Default)]
struct Rendered {
    #[serde(default)]
    rendered: String,
}

impl ApiExtractor {
    /// Creates an API extractor with the bundled HTTP fetcher.
    pub fn new(config: SiteConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(Some(Duration::from_secs(config.timeout))));
        Self { fetcher, config }
    }

    /// Creates an API extractor with an injected fetch capability.
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, config: SiteConfig) -> Self {
        Self { fetcher, config }
    }

    async fn try_search(&self, keyword: &str) -> Result<Vec<SearchResult>, ExtractError> {
        let payload = self
            .fetcher
            .fetch_json(&self.config.search_url(keyword))
            .await?;
        let hits: Vec<SearchHit> = serde_json::from_value(payload)?;

        // One poster lookup task per hit; the result cap bounds the
        // concurrency. Output order follows the API's result order, not
        // task completion order.
        let mut pending = Vec::new();
        for hit in hits.into_iter().take(self.config.max_results) {
            let title = hit.title.trim().to_string();
            let href = hit.url.trim().to_string();
            let lookup = if href.is_empty() {
                None
            } else {
                let fetcher = Arc::clone(&self.fetcher);
                let page_url = href.clone();
                Some(tokio::spawn(fetch_poster(fetcher, page_url)))
            };
            pending.push((title, href, lookup));
        }

        let mut results = Vec::new();
        for (title, href, lookup) in pending {
            let image = match lookup {
                Some(handle) => handle.await.unwrap_or_default(),
                None => String::new(),
            };
            if title.is_empty() || href.is_empty() {
                debug!("Dropping search hit with missing title or url");
                continue;
            }
            results.push(SearchResult { title, image, href });
        }
        Ok(results)
    }

    async fn try_details(&self, reference: &str) -> Result<Vec<DetailRecord>, ExtractError> {
        let slug = slug_from_url(reference).ok_or(ExtractError::Missing("content slug"))?;
        let payload = self
            .fetcher
            .fetch_json(&self.config.content_url(&slug))
            .await?;
        let posts: Vec<Post> = serde_json::from_value(payload)?;

        let record = match posts.into_iter().next() {
            Some(post) => DetailRecord::from_fields(
                strip_markup(&post.content.rendered),
                strip_markup(&post.title.rendered),
                year_from_slug(&slug).unwrap_or_default(),
            ),
            None => {
                debug!("No content entry for slug {slug}");
                DetailRecord::unavailable()
            }
        };
        Ok(vec![record])
    }

    async fn try_resolve_stream(&self, reference: &str) -> Result<Option<String>, ExtractError> {
        let page = self.fetcher.fetch_text(reference).await?;
        let document = Html::parse_document(&page);
        Ok(fields::marker_iframe_src(
            &document,
            &self.config.stream_marker,
        ))
    }
}

/// Poster lookup for one search hit. Failures degrade to an empty image;
/// they never abort the batch.
async fn fetch_poster(fetcher: Arc<dyn Fetcher>, page_url: String) -> String {
    match fetcher.fetch_text(&page_url).await {
        Ok(page) => {
            let document = Html::parse_document(&page);
            fields::og_image(&document).unwrap_or_default()
        }
        Err(e) => {
            debug!("Poster lookup failed for {page_url}: {e}");
            String::new()
        }
    }
}

#[async_trait]
impl Extractor for ApiExtractor {
    async fn search(&self, input: &str) -> Vec<SearchResult> {
        match self.try_search(input).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Search failed for {input:?}: {e}");
                Vec::new()
            }
        }
    }

    async fn details(&self, input: &str) -> Vec<DetailRecord> {
        match self.try_details(input).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Detail extraction failed for {input:?}: {e}");
                vec![DetailRecord::unavailable()]
            }
        }
    }

    async fn episodes(&self, input: &str) -> Vec<Episode> {
        // Single-work site: exactly one synthetic episode pointing back at
        // the reference
        vec![Episode {
            href: input.trim().to_string(),
            number: "1".to_string(),
        }]
    }

    async fn resolve_stream(&self, input: &str) -> Option<String> {
        match self.try_resolve_stream(input).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Stream resolution failed for {input:?}: {e}");
                None
            }
        }
    }
}
