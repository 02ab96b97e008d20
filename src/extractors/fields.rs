//! Per-field extractors over the site template.
//!
//! Each function probes one field independently and degrades to `None` (or
//! an empty list) on a miss, so a template drift in one field never takes
//! the others down. All selectors for the versioned site template live in
//! this module.

use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::model::{Episode, SearchResult};
use crate::normalize::{collapse_whitespace, element_text};

/// Content of a meta tag, matched by `property` with a `name` fallback.
fn meta_content(document: &Html, property: &str) -> Option<String> {
    let meta = Selector::parse(&format!(
        "meta[property='{property}'], meta[name='{property}']"
    ))
    .unwrap();
    document
        .select(&meta)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(String::from)
}

/// Poster image from an `og:image` meta property.
pub(crate) fn og_image(document: &Html) -> Option<String> {
    meta_content(document, "og:image")
}

/// Site-declared canonical URL: `og:url` meta first, then the canonical
/// link element.
pub(crate) fn canonical_url(document: &Html) -> Option<String> {
    if let Some(url) = meta_content(document, "og:url") {
        return Some(url);
    }
    let canonical = Selector::parse("link[rel='canonical']").unwrap();
    document
        .select(&canonical)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(String::from)
}

/// `src` of the first iframe whose class attribute contains `marker`.
pub(crate) fn marker_iframe_src(document: &Html, marker: &str) -> Option<String> {
    let iframe = Selector::parse("iframe").unwrap();
    document
        .select(&iframe)
        .find(|frame| {
            frame
                .value()
                .attr("class")
                .is_some_and(|classes| classes.contains(marker))
        })
        .and_then(|frame| frame.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(String::from)
}

/// `src` of the first iframe on the page, regardless of class.
pub(crate) fn first_iframe_src(document: &Html) -> Option<String> {
    let iframe = Selector::parse("iframe[src]").unwrap();
    document
        .select(&iframe)
        .next()
        .and_then(|frame| frame.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(String::from)
}

/// All well-formed result items on a search results page.
///
/// Items missing a link or a title are silently dropped; a missing poster
/// leaves the image field empty.
pub(crate) fn search_items(document: &Html) -> Vec<SearchResult> {
    let block = Selector::parse("div.result-item").unwrap();
    let link = Selector::parse("a[href]").unwrap();
    let poster = Selector::parse("img[src]").unwrap();
    let title = Selector::parse(".title a").unwrap();

    let mut results = Vec::new();
    for item in document.select(&block) {
        let href = item
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let img = item.select(&poster).next();
        let image = img
            .and_then(|el| el.value().attr("src"))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        // Title chain: the title link, then the poster's alt text, then
        // any link text
        let name = item
            .select(&title)
            .next()
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
            .or_else(|| {
                img.and_then(|el| el.value().attr("alt"))
                    .map(collapse_whitespace)
                    .filter(|t| !t.is_empty())
            })
            .or_else(|| {
                item.select(&link)
                    .next()
                    .map(|el| element_text(&el))
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or_default();

        if name.is_empty() || href.is_empty() {
            debug!("Dropping result item with missing title or link");
            continue;
        }
        results.push(SearchResult {
            title: name,
            image,
            href,
        });
    }
    results
}

/// First paragraph following a "Synopsis" heading.
///
/// Headings inside the description container are preferred; a heading
/// anywhere in the document is the fallback.
pub(crate) fn synopsis(document: &Html) -> Option<String> {
    let scoped = Selector::parse(
        "#info h1, #info h2, #info h3, .sbox h1, .sbox h2, .sbox h3",
    )
    .unwrap();
    let anywhere = Selector::parse("h1, h2, h3").unwrap();

    paragraph_after_synopsis(document.select(&scoped))
        .or_else(|| paragraph_after_synopsis(document.select(&anywhere)))
}

fn paragraph_after_synopsis<'a>(
    headings: impl Iterator<Item = ElementRef<'a>>,
) -> Option<String> {
    let paragraph = Selector::parse("p").unwrap();
    for heading in headings {
        if !element_text(&heading).to_lowercase().contains("synopsis") {
            continue;
        }
        // The paragraph is either a direct sibling of the heading or nested
        // in a wrapper div that follows it
        for sibling in heading.next_siblings() {
            let Some(element) = ElementRef::wrap(sibling) else {
                continue;
            };
            if element.value().name() == "p" {
                let text = element_text(&element);
                if !text.is_empty() {
                    return Some(text);
                }
            } else if let Some(p) = element.select(&paragraph).next() {
                let text = element_text(&p);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Value adjacent to an "Original title" label.
pub(crate) fn original_title(document: &Html) -> Option<String> {
    let row = Selector::parse(".custom_fields").unwrap();
    let label = Selector::parse("b, strong").unwrap();
    let value = Selector::parse("span").unwrap();

    for field in document.select(&row) {
        let Some(name) = field.select(&label).next() else {
            continue;
        };
        if !element_text(&name).eq_ignore_ascii_case("original title") {
            continue;
        }
        if let Some(v) = field.select(&value).next() {
            let text = element_text(&v);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    // Fallback: a bare label element anywhere, value in the next element
    for name in document.select(&label) {
        if !element_text(&name).eq_ignore_ascii_case("original title") {
            continue;
        }
        for sibling in name.next_siblings() {
            if let Some(element) = ElementRef::wrap(sibling) {
                let text = element_text(&element);
                if !text.is_empty() {
                    debug!("Found original title via bare label fallback");
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Text of the dedicated date element.
pub(crate) fn air_date(document: &Html) -> Option<String> {
    let date = Selector::parse("span.date").unwrap();
    document
        .select(&date)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
}

/// All well-formed episode list items, in document order.
///
/// An item counts only when both the link and the numbering label are
/// present; the number text is trimmed but never renumbered.
pub(crate) fn episode_items(document: &Html) -> Vec<Episode> {
    let item = Selector::parse("ul.episodios li").unwrap();
    let link = Selector::parse("a[href]").unwrap();
    let numbering = Selector::parse(".numerando").unwrap();

    let mut episodes = Vec::new();
    for li in document.select(&item) {
        let href = li
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let number = li
            .select(&numbering)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default();
        if href.is_empty() || number.is_empty() {
            continue;
        }
        episodes.push(Episode { href, number });
    }
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_image() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:image" content="https://cdn.example/p.jpg"></head></html>"#,
        );
        assert_eq!(og_image(&doc), Some("https://cdn.example/p.jpg".to_string()));
    }

    #[test]
    fn test_canonical_prefers_og_url() {
        let doc = Html::parse_document(
            r#"<head>
                <meta property="og:url" content="https://site.example/movies/a/">
                <link rel="canonical" href="https://site.example/movies/b/">
            </head>"#,
        );
        assert_eq!(
            canonical_url(&doc),
            Some("https://site.example/movies/a/".to_string())
        );
    }

    #[test]
    fn test_canonical_link_fallback() {
        let doc = Html::parse_document(
            r#"<head><link rel="canonical" href="https://site.example/movies/b/"></head>"#,
        );
        assert_eq!(
            canonical_url(&doc),
            Some("https://site.example/movies/b/".to_string())
        );
    }

    #[test]
    fn test_marker_iframe_ignores_unmarked_frames() {
        let doc = Html::parse_document(
            r#"<body>
                <iframe class="ad-banner" src="https://ads.example/x"></iframe>
                <iframe class="metaframe rptss" src="https://play.example/embed/1"></iframe>
            </body>"#,
        );
        assert_eq!(
            marker_iframe_src(&doc, "metaframe"),
            Some("https://play.example/embed/1".to_string())
        );
        assert_eq!(
            first_iframe_src(&doc),
            Some("https://ads.example/x".to_string())
        );
    }
}
