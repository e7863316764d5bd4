mod client;
mod describer;
mod paragraphs;
mod parser;
mod prompt;
mod source;
mod types;

pub use client::{LlmClient, LlmRequest, LlmResponse, Message, OpenAiClient, Role};
#[cfg(any(test, feature = "test-utils"))]
pub use client::test_support::MockLlmClient;
pub use describer::Describer;
pub use paragraphs::{ParagraphPolicy, BUILDING_PARAGRAPHS, SETTLEMENT_PARAGRAPHS};
pub use parser::{
    correct_place_names, parse, split_lines, BuildingParser, ResponseParser, SettlementParser,
    PLACE_NAME_CORRECTIONS,
};
pub use prompt::{
    build_building_prompt, build_prompt, build_settlement_prompt, Prompt, BUILDING_MAX_TOKENS,
    SETTLEMENT_MAX_TOKENS,
};
pub use source::ExcerptSource;
#[cfg(any(test, feature = "test-utils"))]
pub use source::test_support::StaticExcerptSource;
pub use types::{
    BuildingInfo, DescribeResult, InfoRequest, Language, NotFoundInfo, SettlementInfo,
    SubjectType, UNKNOWN_PLACEHOLDER,
};
