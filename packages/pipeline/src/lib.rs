//! Spadchyna pipeline - describe Belarusian buildings and settlements.
//!
//! A request names a Wikipedia article and a subject type. The pipeline
//! fetches the leading paragraphs of the article, asks an LLM for a fixed
//! line layout, and maps the reply onto typed fields.

pub mod api;
pub mod config;
pub mod describe;
pub mod error;

pub use config::{DescribeConfig, ServerConfig};
pub use describe::{DescribeResult, Describer, InfoRequest, Language, SubjectType};
pub use error::PipelineError;
