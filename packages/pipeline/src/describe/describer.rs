use tracing::{debug, info, warn};

use crate::describe::client::{LlmClient, LlmRequest};
use crate::describe::paragraphs::ParagraphPolicy;
use crate::describe::parser;
use crate::describe::prompt;
use crate::describe::source::ExcerptSource;
use crate::describe::types::{DescribeResult, InfoRequest};
use crate::error::Result;

/// Main describe orchestrator.
///
/// Fetches the article excerpt, builds the prompt, asks the LLM once and
/// parses the reply. Holds no per-request state, so one instance serves
/// concurrent requests.
pub struct Describer<S: ExcerptSource, C: LlmClient> {
    source: S,
    client: C,
    paragraphs: ParagraphPolicy,
}

impl<S: ExcerptSource, C: LlmClient> Describer<S, C> {
    pub fn new(source: S, client: C) -> Self {
        Self::with_policy(source, client, ParagraphPolicy::default())
    }

    pub fn with_policy(source: S, client: C, paragraphs: ParagraphPolicy) -> Self {
        Self {
            source,
            client,
            paragraphs,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Answer one information request.
    ///
    /// A missing article yields [`DescribeResult::NotFound`]; failing to reach
    /// the encyclopedia or the LLM is an error and never produces the
    /// placeholder.
    pub async fn describe(&self, request: &InfoRequest) -> Result<DescribeResult> {
        request.validate()?;

        let paragraphs = self
            .paragraphs
            .paragraphs_for(&request.title, request.subject_type);

        info!(
            title = %request.title,
            subject = %request.subject_type,
            language = %request.language,
            paragraphs,
            "describing article"
        );

        let excerpt = self
            .source
            .fetch_excerpt(&request.title, paragraphs)
            .await
            .inspect_err(|e| warn!(title = %request.title, error = %e, "excerpt fetch failed"))?;

        if !excerpt.found {
            info!(title = %request.title, "article not found, returning placeholder");
            return Ok(DescribeResult::not_found());
        }

        let prompt = prompt::build_prompt(&excerpt, request)?;
        debug!(
            title = %request.title,
            prompt_len = prompt.text.len(),
            max_tokens = prompt.max_tokens,
            "prompt built"
        );

        let llm_request = LlmRequest::single_turn(&prompt.text, prompt.max_tokens);
        let response = self.client.complete(&llm_request).await?;

        let result = parser::parse(&response.content, request.subject_type).inspect_err(|e| {
            warn!(title = %request.title, error = %e, "completion did not match expected layout")
        })?;

        info!(title = %request.title, subject = %request.subject_type, "article described");
        Ok(result)
    }
}
