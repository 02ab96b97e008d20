use config::{Config, ConfigError, Environment, File};
use log::warn;
use serde::Deserialize;

/// Site configuration for the extraction backends.
///
/// The selectors in `extractors::fields` are tied to one site template
/// version; this struct carries everything that varies per deployment
/// without a template change: endpoints, the search subtype, the result
/// cap and the stream marker token.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Base URL of the catalog site
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the content-search JSON endpoint
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Path of the content-by-slug JSON endpoint
    #[serde(default = "default_content_path")]
    pub content_path: String,
    /// Content subtype the search is filtered to
    #[serde(default = "default_search_subtype")]
    pub search_subtype: String,
    /// Maximum number of search results per query; also bounds the
    /// concurrent poster lookups
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Class token identifying the playable stream iframe
    #[serde(default = "default_stream_marker")]
    pub stream_marker: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

// Default value functions
fn default_base_url() -> String {
    "https://example-movies.org".to_string()
}

fn default_search_path() -> String {
    "/wp-json/wp/v2/search".to_string()
}

fn default_content_path() -> String {
    "/wp-json/wp/v2/movies".to_string()
}

fn default_search_subtype() -> String {
    "movies".to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_stream_marker() -> String {
    "metaframe".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: default_base_url(),
            search_path: default_search_path(),
            content_path: default_content_path(),
            search_subtype: default_search_subtype(),
            max_results: default_max_results(),
            stream_marker: default_stream_marker(),
            timeout: default_timeout(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CINESCRAPE__ prefix
    /// 2. cinescrape.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CINESCRAPE__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Like [`SiteConfig::load`], but degrades to defaults instead of
    /// failing. Extraction operations must never error out over a bad
    /// config file.
    pub fn load_or_default() -> Self {
        match load_config() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {e}");
                SiteConfig::default()
            }
        }
    }

    /// Full URL of a content-search query for `keyword`.
    pub(crate) fn search_url(&self, keyword: &str) -> String {
        format!(
            "{}{}?search={}&subtype={}&per_page={}",
            self.base_url,
            self.search_path,
            urlencoding::encode(keyword.trim()),
            self.search_subtype,
            self.max_results
        )
    }

    /// Full URL of a content-by-slug query.
    pub(crate) fn content_url(&self, slug: &str) -> String {
        format!(
            "{}{}?slug={}",
            self.base_url,
            self.content_path,
            urlencoding::encode(slug)
        )
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cinescrape").required(false))
        // Environment variables with CINESCRAPE prefix
        .add_source(
            Environment::with_prefix("CINESCRAPE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SiteConfig::default();
        assert_eq!(config.base_url, "https://example-movies.org");
        assert_eq!(config.search_subtype, "movies");
        assert_eq!(config.max_results, 10);
        assert_eq!(config.stream_marker, "metaframe");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_search_url_encodes_and_trims_keyword() {
        let config = SiteConfig::default();
        assert_eq!(
            config.search_url("  blade runner "),
            "https://example-movies.org/wp-json/wp/v2/search?search=blade%20runner&subtype=movies&per_page=10"
        );
    }

    #[test]
    fn test_content_url() {
        let config = SiteConfig::default();
        assert_eq!(
            config.content_url("foo-2024"),
            "https://example-movies.org/wp-json/wp/v2/movies?slug=foo-2024"
        );
    }
}
