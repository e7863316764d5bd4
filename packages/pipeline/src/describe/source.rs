use async_trait::async_trait;

use spadchyna_harvester::{ArticleExcerpt, WikiClient};

use crate::error::Result;

/// Where article excerpts come from.
///
/// `Ok` with `found == false` means the article does not exist; `Err` means
/// the source could not be asked.
#[async_trait]
pub trait ExcerptSource: Send + Sync {
    async fn fetch_excerpt(&self, title: &str, paragraphs: usize) -> Result<ArticleExcerpt>;
}

#[async_trait]
impl ExcerptSource for WikiClient {
    async fn fetch_excerpt(&self, title: &str, paragraphs: usize) -> Result<ArticleExcerpt> {
        Ok(WikiClient::fetch_excerpt(self, title, paragraphs).await?)
    }
}

/// Test utilities for excerpt sources.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use spadchyna_harvester::HarvesterError;

    /// In-memory excerpt source. Unknown titles are reported as not found.
    #[derive(Default)]
    pub struct StaticExcerptSource {
        articles: HashMap<String, String>,
        fail_with_status: Option<u16>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl StaticExcerptSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register an article; `extract` is split on line breaks like the real API.
        pub fn with_article(mut self, title: &str, extract: &str) -> Self {
            self.articles.insert(title.to_string(), extract.to_string());
            self
        }

        /// Make every fetch fail as if the API answered with `status`.
        pub fn failing(status: u16) -> Self {
            Self {
                fail_with_status: Some(status),
                ..Self::default()
            }
        }

        /// `(title, paragraphs)` of every fetch so far.
        pub fn calls(&self) -> Vec<(String, usize)> {
            self.calls
                .lock()
                .map(|calls| calls.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl ExcerptSource for StaticExcerptSource {
        async fn fetch_excerpt(&self, title: &str, paragraphs: usize) -> Result<ArticleExcerpt> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((title.to_string(), paragraphs));
            }
            if let Some(status) = self.fail_with_status {
                return Err(HarvesterError::Status {
                    status,
                    title: title.to_string(),
                }
                .into());
            }
            Ok(match self.articles.get(title) {
                Some(extract) => ArticleExcerpt::found(
                    title,
                    spadchyna_harvester::excerpt::split_paragraphs(extract, paragraphs),
                ),
                None => ArticleExcerpt::not_found(title),
            })
        }
    }
}
