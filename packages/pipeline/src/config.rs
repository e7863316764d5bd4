use std::net::SocketAddr;

use spadchyna_harvester::config::DEFAULT_WIKI_API_URL;

use crate::describe::ParagraphPolicy;
use crate::error::{PipelineError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

/// Configuration for the describe pipeline.
///
/// NOTE: `Debug` is implemented by hand so the API key never reaches logs.
#[derive(Clone)]
pub struct DescribeConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub wiki_api_url: String,
    pub paragraphs: ParagraphPolicy,
}

impl std::fmt::Debug for DescribeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescribeConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("wiki_api_url", &self.wiki_api_url)
            .field("paragraphs", &self.paragraphs)
            .finish()
    }
}

impl DescribeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("OPENAI_API_KEY not set".into()))?;

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let api_base_url =
            std::env::var("LLM_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());

        let timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let wiki_api_url =
            std::env::var("WIKI_API_URL").unwrap_or_else(|_| DEFAULT_WIKI_API_URL.into());

        let paragraphs = match std::env::var("PARAGRAPH_OVERRIDES") {
            Ok(list) => ParagraphPolicy::default().with_overrides_list(&list)?,
            Err(_) => ParagraphPolicy::default(),
        };

        Ok(Self {
            api_key,
            model,
            api_base_url,
            timeout_secs,
            wiki_api_url,
            paragraphs,
        })
    }

    /// Create a config builder for testing.
    pub fn builder(api_key: impl Into<String>) -> DescribeConfigBuilder {
        DescribeConfigBuilder {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            wiki_api_url: DEFAULT_WIKI_API_URL.into(),
            paragraphs: ParagraphPolicy::default(),
        }
    }
}

/// Builder for constructing `DescribeConfig` in tests.
pub struct DescribeConfigBuilder {
    api_key: String,
    model: String,
    api_base_url: String,
    timeout_secs: u64,
    wiki_api_url: String,
    paragraphs: ParagraphPolicy,
}

impl DescribeConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn wiki_api_url(mut self, wiki_api_url: impl Into<String>) -> Self {
        self.wiki_api_url = wiki_api_url.into();
        self
    }

    pub fn paragraphs(mut self, paragraphs: ParagraphPolicy) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    pub fn build(self) -> DescribeConfig {
        DescribeConfig {
            api_key: self.api_key,
            model: self.model,
            api_base_url: self.api_base_url,
            timeout_secs: self.timeout_secs,
            wiki_api_url: self.wiki_api_url,
            paragraphs: self.paragraphs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = raw
            .parse()
            .map_err(|_| PipelineError::Config(format!("LISTEN_ADDR '{raw}' is not host:port")))?;
        Ok(Self { listen_addr })
    }
}
