//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::error::{HarvesterError, Result};

/// Read API of the Belarusian (classical orthography) Wikipedia.
pub const DEFAULT_WIKI_API_URL: &str = "https://be-tarask.wikipedia.org/w/api.php";

/// Public article base URL matching [`DEFAULT_WIKI_API_URL`].
pub const WIKI_ARTICLE_BASE_URL: &str = "https://be-tarask.wikipedia.org/wiki";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Runs of whitespace or underscores, which MediaWiki folds into one space.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid regex"));

/// Normalize a page title the way MediaWiki resolves it.
///
/// The title is composed to NFC and runs of spaces or underscores collapse to
/// a single space. Belarusian `ў` can arrive either precomposed (U+045E) or as
/// `у` followed by a combining breve, and MediaWiki stores titles in NFC.
///
/// # Examples
/// ```
/// use spadchyna_harvester::config::normalize_title;
///
/// assert_eq!(normalize_title(" Заслаўе "), "Заслаўе");
/// assert_eq!(normalize_title("Заслау\u{0306}е"), "Заслаўе");
/// assert_eq!(normalize_title("Мірскі_замак"), "Мірскі замак");
/// ```
pub fn normalize_title(title: &str) -> String {
    let composed: String = title.nfc().collect();
    TITLE_SEPARATORS
        .replace_all(composed.trim(), " ")
        .trim()
        .to_string()
}

/// Validate a page title before it is sent to the read API.
///
/// Only an empty title is rejected here. Anything else is sent as is, and the
/// API's `missing` or `invalid` flags decide whether an article exists.
///
/// # Examples
/// ```
/// use spadchyna_harvester::config::validate_title;
///
/// assert!(validate_title("Мірскі замак").is_ok());
/// assert!(validate_title("Замак [1]").is_ok());
/// assert!(validate_title(" _ ").is_err());
/// ```
pub fn validate_title(title: &str) -> Result<()> {
    if normalize_title(title).is_empty() {
        return Err(HarvesterError::InvalidTitle("title is empty".to_string()));
    }
    Ok(())
}

/// Build the public article URL for a title.
///
/// Spaces become underscores, the way MediaWiki renders links.
///
/// # Examples
/// ```
/// use spadchyna_harvester::config::article_url;
///
/// assert_eq!(
///     article_url("Мірскі замак"),
///     "https://be-tarask.wikipedia.org/wiki/Мірскі_замак"
/// );
/// ```
pub fn article_url(title: &str) -> String {
    format!(
        "{WIKI_ARTICLE_BASE_URL}/{}",
        normalize_title(title).replace(' ', "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_composes_short_u() {
        let decomposed = "Сьвіслач і Заслау\u{0306}е";
        let normalized = normalize_title(decomposed);
        assert!(normalized.contains('ў'));
        assert!(!normalized.contains('\u{0306}'));
    }

    #[test]
    fn test_normalize_title_is_stable() {
        let once = normalize_title("Горадня");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn test_normalize_title_collapses_separators() {
        assert_eq!(
            normalize_title("Касьцёл__Сьвятога  Міхаіла"),
            "Касьцёл Сьвятога Міхаіла"
        );
        assert_eq!(normalize_title("_Горадня_"), "Горадня");
    }

    #[test]
    fn test_validate_title_rejects_whitespace_only() {
        assert!(matches!(
            validate_title("   "),
            Err(HarvesterError::InvalidTitle(_))
        ));
    }

    #[test]
    fn test_validate_title_leaves_page_names_to_the_api() {
        let long = "ж".repeat(200);
        for title in ["Замак [1]", "Горадня#Гісторыя", "a|b", "{{x}}", long.as_str()] {
            assert!(validate_title(title).is_ok(), "{title} should be sent to the API");
        }
    }

    #[test]
    fn test_validate_title_accepts_punctuation() {
        assert!(validate_title("Полацк (горад)").is_ok());
        assert!(validate_title("Касьцёл Сьвятога Міхаіла, Смаргонь").is_ok());
    }
}
