//! Spadchyna Harvester - Fetch plain-text article excerpts from Belarusian Wikipedia.
//!
//! This crate retrieves the leading paragraphs of a Wikipedia article through
//! the MediaWiki read API. A missing page is a normal outcome
//! (`ArticleExcerpt { found: false, .. }`); failing to reach the API is an
//! error, so callers can never mistake one for the other.
//!
//! # Example
//!
//! ```
//! use spadchyna_harvester::config;
//!
//! assert!(config::validate_title("Мірскі замак").is_ok());
//! assert!(config::validate_title("").is_err());
//! assert_eq!(config::normalize_title("Мірскі_замак"), "Мірскі замак");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Endpoint constants, title normalization and validation
//! - [`types`]: Excerpt type and MediaWiki response shapes
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client construction
//! - [`excerpt`]: Excerpt retrieval
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod excerpt;
pub mod http;
pub mod types;

pub use excerpt::{fetch_excerpt, WikiClient};

pub use config::{normalize_title, validate_title};
pub use error::{HarvesterError, Result};
pub use types::ArticleExcerpt;
