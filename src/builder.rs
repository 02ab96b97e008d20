use std::sync::Arc;
use std::time::Duration;

use crate::config::SiteConfig;
use crate::extractors::{ApiExtractor, Extractor, HtmlExtractor};
use crate::fetcher::Fetcher;

/// Which extraction backend to build
#[derive(Debug, Clone, Copy, Default)]
pub enum Backend {
    /// Query the site's JSON content API (default)
    #[default]
    Api,
    /// Extract from pre-fetched HTML documents
    Html,
}

/// Builder for configuring an extraction backend
#[derive(Default)]
pub struct ExtractorBuilder {
    backend: Backend,
    config: Option<SiteConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl ExtractorBuilder {
    /// Select the extraction backend
    ///
    /// # Example
    /// ```
    /// use cinescrape::{Backend, CatalogExtractor};
    ///
    /// let extractor = CatalogExtractor::builder()
    ///     .backend(Backend::Html)
    ///     .build();
    /// ```
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Use a fully specified configuration instead of the loaded one
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the catalog site's base URL
    ///
    /// # Example
    /// ```
    /// use cinescrape::CatalogExtractor;
    ///
    /// let extractor = CatalogExtractor::builder()
    ///     .base_url("https://movies.example")
    ///     .build();
    /// ```
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject a custom fetch capability (API backend only)
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the configured backend
    ///
    /// Configuration falls back to loaded (or default) values for anything
    /// not set on the builder; building never fails.
    pub fn build(self) -> Box<dyn Extractor> {
        let mut config = self.config.unwrap_or_else(SiteConfig::load_or_default);
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs();
        }

        match self.backend {
            Backend::Api => match self.fetcher {
                Some(fetcher) => Box::new(ApiExtractor::with_fetcher(fetcher, config)),
                None => Box::new(ApiExtractor::new(config)),
            },
            Backend::Html => Box::new(HtmlExtractor::new(config)),
        }
    }
}

/// Main entry point for the builder API
pub struct CatalogExtractor;

impl CatalogExtractor {
    /// Creates a new builder for configuring an extraction backend
    ///
    /// # Example
    /// ```
    /// use cinescrape::CatalogExtractor;
    ///
    /// let builder = CatalogExtractor::builder();
    /// ```
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }
}
