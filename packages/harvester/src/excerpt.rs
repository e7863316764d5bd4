//! Article excerpt retrieval.
//!
//! Queries the MediaWiki `prop=extracts` API for the plain text of a page and
//! keeps only its leading paragraphs. Absent pages are normalized into
//! [`ArticleExcerpt::not_found`]. Failures to talk to the API, and refusals
//! it reports in an `error` object, are errors.

use reqwest::Client;
use url::Url;

use crate::config::{normalize_title, validate_title, DEFAULT_WIKI_API_URL};
use crate::error::{HarvesterError, Result};
use crate::http::create_client;
use crate::types::{ArticleExcerpt, QueryResponse};

/// Client for the encyclopedia read API.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
    api_url: Url,
}

impl WikiClient {
    /// Client for the default Belarusian Wikipedia endpoint.
    pub fn new() -> Result<Self> {
        Self::with_api_url(DEFAULT_WIKI_API_URL)
    }

    /// Client for a custom `api.php` endpoint (mirrors, test servers).
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        Ok(Self {
            http: create_client()?,
            api_url: Url::parse(api_url)?,
        })
    }

    /// Use an already configured HTTP client.
    pub fn with_client(http: Client, api_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            api_url: Url::parse(api_url)?,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Build the query URL for a title.
    pub fn query_url(&self, title: &str) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("titles", title)
            .append_pair("prop", "extracts")
            .append_pair("explaintext", "true");
        url
    }

    /// Fetch at most `paragraphs` leading paragraphs of the page `title`.
    ///
    /// # Returns
    /// * `Ok(excerpt)` with `found == true` and the paragraphs when the page exists
    /// * `Ok(excerpt)` with `found == false` when the page is absent or empty
    /// * `Err(_)` when the API could not be reached, refused the query or answered
    ///   unexpectedly
    pub async fn fetch_excerpt(&self, title: &str, paragraphs: usize) -> Result<ArticleExcerpt> {
        validate_title(title)?;
        let title = normalize_title(title);
        let url = self.query_url(&title);

        tracing::debug!(title = %title, paragraphs, "Requesting article extract");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(title = %title, status = %status, "Wikipedia API error");
            return Err(HarvesterError::Status {
                status: status.as_u16(),
                title,
            });
        }

        let body = response.text().await?;
        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|e| HarvesterError::Decode {
                title: title.clone(),
                message: e.to_string(),
            })?;

        if let Some(error) = parsed.error {
            tracing::warn!(title = %title, code = %error.code, "Wikipedia API refused query");
            return Err(HarvesterError::Api {
                title,
                code: error.code,
                info: error.info,
            });
        }
        if parsed.query.is_none() {
            return Err(HarvesterError::Decode {
                title,
                message: "response has neither 'query' nor 'error'".to_string(),
            });
        }

        let Some(extract) = parsed.first_page().and_then(|page| page.usable_extract()) else {
            tracing::info!(title = %title, "Article not found");
            return Ok(ArticleExcerpt::not_found(title));
        };

        let kept = split_paragraphs(extract, paragraphs);
        tracing::debug!(title = %title, kept = kept.len(), "Article extract received");
        Ok(ArticleExcerpt::found(title, kept))
    }
}

/// Fetch an excerpt from the default endpoint with a fresh client.
pub async fn fetch_excerpt(title: &str, paragraphs: usize) -> Result<ArticleExcerpt> {
    WikiClient::new()?.fetch_excerpt(title, paragraphs).await
}

/// Split an extract on line breaks and keep the first `count` pieces.
///
/// Blank pieces are kept and counted, so the excerpt is a true prefix of the
/// extract.
///
/// # Examples
/// ```
/// use spadchyna_harvester::excerpt::split_paragraphs;
///
/// assert_eq!(split_paragraphs("a\nb\nc", 2), vec!["a", "b"]);
/// assert_eq!(split_paragraphs("a", 4), vec!["a"]);
/// ```
pub fn split_paragraphs(extract: &str, count: usize) -> Vec<String> {
    extract
        .split('\n')
        .take(count)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_paragraphs_preserves_order() {
        let extract = "Першы.\nДругі.\nТрэці.";
        assert_eq!(split_paragraphs(extract, 2), vec!["Першы.", "Другі."]);
    }

    #[test]
    fn test_split_paragraphs_counts_blank_lines() {
        let extract = "Першы.\n\n\n== Гісторыя ==\nТэкст.";
        assert_eq!(split_paragraphs(extract, 3), vec!["Першы.", "", ""]);
    }

    #[test]
    fn test_split_paragraphs_zero() {
        assert!(split_paragraphs("Першы.", 0).is_empty());
    }

    #[test]
    fn test_query_url_parameters() {
        let client = WikiClient::new().expect("client");
        let url = client.query_url("Мірскі замак");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("action".to_string(), "query".to_string()),
                ("format".to_string(), "json".to_string()),
                ("titles".to_string(), "Мірскі замак".to_string()),
                ("prop".to_string(), "extracts".to_string()),
                ("explaintext".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(url.path(), "/w/api.php");
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(matches!(
            WikiClient::with_api_url("not a url"),
            Err(HarvesterError::InvalidApiUrl(_))
        ));
    }
}
