use thiserror::Error;

use spadchyna_harvester::HarvesterError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("excerpt retrieval failed: {0}")]
    Excerpt(#[from] HarvesterError),

    #[error("LLM API request failed: {0}")]
    LlmApiRequest(#[from] reqwest::Error),

    #[error("LLM API error (status {status}): {message}")]
    LlmApiError { status: u16, message: String },

    #[error("LLM rate limited, retry after {retry_after_secs}s")]
    LlmRateLimited { retry_after_secs: u64 },

    #[error("failed to parse LLM response: {0}")]
    LlmResponseParse(String),

    #[error("LLM returned empty response")]
    LlmEmptyResponse,

    #[error("malformed {subject} output: expected at least {expected} lines, got {got}")]
    MalformedOutput {
        subject: String,
        expected: usize,
        got: usize,
    },
}

impl PipelineError {
    /// Failures caused by the request itself rather than by a collaborator.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::Excerpt(e) => e.is_invalid_input(),
            _ => false,
        }
    }

    /// Failures of the encyclopedia or the completion provider, including
    /// replies that could not be mapped onto the expected fields.
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::Excerpt(e) => !e.is_invalid_input() && !e.is_misconfiguration(),
            Self::LlmApiRequest(_)
            | Self::LlmApiError { .. }
            | Self::LlmRateLimited { .. }
            | Self::LlmResponseParse(_)
            | Self::LlmEmptyResponse
            | Self::MalformedOutput { .. } => true,
            Self::Config(_) | Self::InvalidInput(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_transport_error_is_upstream() {
        let err = PipelineError::from(HarvesterError::Status {
            status: 500,
            title: "Горадня".into(),
        });
        assert!(err.is_upstream());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_title_is_client_error() {
        let err = PipelineError::from(HarvesterError::InvalidTitle("title is empty".into()));
        assert!(err.is_client_error());
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_bad_wiki_url_is_neither_client_nor_upstream() {
        let wiki_err = spadchyna_harvester::WikiClient::with_api_url("not a url")
            .expect_err("unparsable URL");
        assert!(matches!(wiki_err, HarvesterError::InvalidApiUrl(_)));
        let err = PipelineError::from(wiki_err);
        assert!(!err.is_upstream());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_wiki_refusal_is_upstream() {
        let err = PipelineError::from(HarvesterError::Api {
            title: "Горадня".into(),
            code: "maxlag".into(),
            info: "lagged".into(),
        });
        assert!(err.is_upstream());
    }

    #[test]
    fn test_malformed_output_display() {
        let err = PipelineError::MalformedOutput {
            subject: "building".into(),
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "malformed building output: expected at least 2 lines, got 1"
        );
    }
}
