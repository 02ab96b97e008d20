use serde::Serialize;

/// Sentinel used when no description could be extracted.
pub const NO_DESCRIPTION: &str = "No description available";

/// Sentinel used when an alias or air date could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single search hit.
///
/// Only emitted when both `title` and `href` are non-empty; `image` may be
/// empty when the poster lookup failed or the page carried none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub image: String,
    pub href: String,
}

/// Detail metadata for a single catalog entry.
///
/// Fields are never empty: anything that could not be extracted is replaced
/// with a sentinel so the host can distinguish "known absent" from "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub description: String,
    pub aliases: String,
    pub airdate: String,
}

impl DetailRecord {
    /// Assembles a record from raw extracted fields, substituting sentinels
    /// for anything left empty.
    pub fn from_fields(description: String, aliases: String, airdate: String) -> Self {
        DetailRecord {
            description: or_sentinel(description, NO_DESCRIPTION),
            aliases: or_sentinel(aliases, NOT_AVAILABLE),
            airdate: or_sentinel(airdate, NOT_AVAILABLE),
        }
    }

    /// An all-sentinel record, used when extraction failed entirely.
    pub fn unavailable() -> Self {
        Self::from_fields(String::new(), String::new(), String::new())
    }
}

/// One playable episode. Single-work content gets a synthetic episode
/// numbered "1" pointing back at the canonical page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub href: String,
    pub number: String,
}

fn or_sentinel(value: String, sentinel: &str) -> String {
    if value.trim().is_empty() {
        sentinel.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_substitutes_sentinels() {
        let record = DetailRecord::from_fields(
            "A hero rises.".to_string(),
            String::new(),
            "  ".to_string(),
        );
        assert_eq!(record.description, "A hero rises.");
        assert_eq!(record.aliases, NOT_AVAILABLE);
        assert_eq!(record.airdate, NOT_AVAILABLE);
    }

    #[test]
    fn test_unavailable_is_all_sentinel() {
        let record = DetailRecord::unavailable();
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.aliases, NOT_AVAILABLE);
        assert_eq!(record.airdate, NOT_AVAILABLE);
    }
}
