//! Core data types for excerpts and the MediaWiki query response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bounded plain-text prefix of an encyclopedia article.
///
/// Lives for a single request. `paragraphs` is empty whenever `found` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleExcerpt {
    /// Title as it was requested (after normalization).
    pub title: String,
    /// Leading paragraphs of the article, in original order.
    pub paragraphs: Vec<String>,
    /// Whether the page exists and has text.
    pub found: bool,
}

impl ArticleExcerpt {
    pub fn found(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs,
            found: true,
        }
    }

    pub fn not_found(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs: Vec::new(),
            found: false,
        }
    }

    /// Paragraphs re-joined with line breaks, as they appeared in the extract.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Top-level body of `action=query&format=json`.
///
/// MediaWiki reports refusals such as `maxlag` or `readonly` with status 200
/// and an `error` object in place of `query`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// The `error` object of a MediaWiki API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// Pages keyed by page id. Missing pages use negative ids ("-1").
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
}

/// One entry of the page map.
#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub pageid: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Present (as an empty string) when the page does not exist.
    #[serde(default)]
    pub missing: Option<serde_json::Value>,
    /// Present when the title itself is not a valid page name.
    #[serde(default)]
    pub invalid: Option<serde_json::Value>,
    #[serde(default)]
    pub extract: Option<String>,
}

impl Page {
    /// Extract text if this page exists and has any.
    pub fn usable_extract(&self) -> Option<&str> {
        if self.missing.is_some() || self.invalid.is_some() {
            return None;
        }
        if matches!(self.pageid, Some(id) if id <= 0) {
            return None;
        }
        self.extract.as_deref().filter(|text| !text.is_empty())
    }
}

impl QueryResponse {
    /// The first page of the page map, if any.
    pub fn first_page(&self) -> Option<&Page> {
        self.query.as_ref()?.pages.values().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> QueryResponse {
        serde_json::from_str(json).expect("valid fixture")
    }

    #[test]
    fn test_existing_page_has_extract() {
        let response = parse(
            r#"{"batchcomplete":"","query":{"pages":{"123":{"pageid":123,"ns":0,"title":"Мір","extract":"Мір — пасёлак."}}}}"#,
        );
        let page = response.first_page().expect("page");
        assert_eq!(page.usable_extract(), Some("Мір — пасёлак."));
        assert_eq!(page.title.as_deref(), Some("Мір"));
    }

    #[test]
    fn test_missing_page_has_no_extract() {
        let response = parse(
            r#"{"batchcomplete":"","query":{"pages":{"-1":{"ns":0,"title":"Няма","missing":""}}}}"#,
        );
        assert!(response.first_page().expect("page").usable_extract().is_none());
    }

    #[test]
    fn test_invalid_page_has_no_extract() {
        let response = parse(
            r#"{"query":{"pages":{"-1":{"title":"a|b","invalidreason":"bad","invalid":""}}}}"#,
        );
        assert!(response.first_page().expect("page").usable_extract().is_none());
    }

    #[test]
    fn test_empty_extract_is_unusable() {
        let response =
            parse(r#"{"query":{"pages":{"7":{"pageid":7,"title":"Пуста","extract":""}}}}"#);
        assert!(response.first_page().expect("page").usable_extract().is_none());
    }

    #[test]
    fn test_response_without_query() {
        let response = parse(r#"{"batchcomplete":""}"#);
        assert!(response.query.is_none());
        assert!(response.error.is_none());
        assert!(response.first_page().is_none());
    }

    #[test]
    fn test_error_envelope_is_captured() {
        let response = parse(
            r#"{"error":{"code":"maxlag","info":"Waiting for a database server: 7 seconds lagged."}}"#,
        );
        let error = response.error.expect("error body");
        assert_eq!(error.code, "maxlag");
        assert!(error.info.starts_with("Waiting for a database server"));
        assert!(response.query.is_none());
    }

    #[test]
    fn test_excerpt_text_joins_with_newlines() {
        let excerpt = ArticleExcerpt::found("Мір", vec!["a".into(), "".into(), "b".into()]);
        assert_eq!(excerpt.text(), "a\n\nb");
        assert!(ArticleExcerpt::not_found("Мір").paragraphs.is_empty());
    }
}
