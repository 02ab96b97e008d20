use html_escape::decode_html_entities;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

// Four-digit release year embedded in a content slug, e.g. "dune-part-two-2024".
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19|20)\d{2}").expect("valid year pattern"));

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips markup from an HTML fragment, yielding normalized plain text.
///
/// Rendered API payloads are often double-escaped, so entities are decoded
/// once more after the parser has done its pass.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&decode_html_entities(&text))
}

/// Normalized text content of an element.
pub(crate) fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// The last non-empty path segment of a page URL, identifying the content.
///
/// Query string and fragment are stripped first.
pub fn slug_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.split('/')
        .rev()
        .find(|segment| !segment.is_empty() && !segment.contains(':'))
        .map(|segment| segment.to_string())
}

/// Four-digit year found in a content slug, used as an air-date proxy.
pub fn year_from_slug(slug: &str) -> Option<String> {
    YEAR.find(slug).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>A hero <b>rises</b>.</p>\n<p>Again.</p>"),
            "A hero rises . Again."
        );
    }

    #[test]
    fn test_strip_markup_decodes_entities() {
        assert_eq!(strip_markup("<p>Bonnie &amp;amp; Clyde</p>"), "Bonnie & Clyde");
    }

    #[test]
    fn test_slug_from_url() {
        assert_eq!(
            slug_from_url("https://site.example/movies/foo-2024/"),
            Some("foo-2024".to_string())
        );
        assert_eq!(
            slug_from_url("https://site.example/movies/foo-2024?tab=cast"),
            Some("foo-2024".to_string())
        );
        assert_eq!(slug_from_url(""), None);
    }

    #[test]
    fn test_year_from_slug() {
        assert_eq!(year_from_slug("dune-part-two-2024"), Some("2024".to_string()));
        assert_eq!(year_from_slug("metropolis-1927"), Some("1927".to_string()));
        assert_eq!(year_from_slug("no-year-here"), None);
    }
}
