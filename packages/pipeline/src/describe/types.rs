use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{PipelineError, Result};

/// Placeholder used for every field when the article cannot be located.
pub const UNKNOWN_PLACEHOLDER: &str = "Невядома";

/// What kind of subject the article describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubjectType {
    /// An architectural monument.
    Building,
    /// A populated place (city, town or village).
    #[serde(alias = "city")]
    #[strum(to_string = "settlement", serialize = "city")]
    Settlement,
}

/// Natural language the model is asked to answer in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Language {
    /// Belarusian.
    #[default]
    #[serde(rename = "be")]
    #[strum(serialize = "be")]
    Local,
    /// English. Any language code other than `be` selects it on the wire.
    #[serde(rename = "en", other)]
    #[strum(serialize = "en")]
    Foreign,
}

/// A structured information request about one article.
///
/// Field names on the wire follow the public `/ask` contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoRequest {
    /// Encyclopedia page title.
    pub title: String,
    #[serde(rename = "type")]
    pub subject_type: SubjectType,
    #[serde(rename = "lang", default)]
    pub language: Language,
    /// Latin-script name of the settlement, used for foreign-language answers.
    #[serde(rename = "titleL", default)]
    pub latin_title: Option<String>,
}

impl InfoRequest {
    pub fn building(title: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            subject_type: SubjectType::Building,
            language,
            latin_title: None,
        }
    }

    pub fn settlement(
        title: impl Into<String>,
        language: Language,
        latin_title: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subject_type: SubjectType::Settlement,
            language,
            latin_title,
        }
    }

    /// Check the request before any network I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PipelineError::InvalidInput("title must not be empty".into()));
        }
        if self.needs_latin_title() && self.latin_title().is_none() {
            return Err(PipelineError::InvalidInput(
                "titleL is required for settlement requests in a foreign language".into(),
            ));
        }
        Ok(())
    }

    /// Latin title, if present and not blank.
    pub fn latin_title(&self) -> Option<&str> {
        self.latin_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    fn needs_latin_title(&self) -> bool {
        self.subject_type == SubjectType::Settlement && self.language == Language::Foreign
    }
}

/// Parsed answer for a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub style: String,
    pub time: String,
}

/// Parsed answer for a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInfo {
    pub population: String,
    pub text: String,
}

/// Uniform answer when the article does not exist, whatever the subject type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundInfo {
    pub style: String,
    pub time: String,
    pub population: String,
    pub text: String,
}

impl Default for NotFoundInfo {
    fn default() -> Self {
        Self {
            style: UNKNOWN_PLACEHOLDER.to_string(),
            time: UNKNOWN_PLACEHOLDER.to_string(),
            population: UNKNOWN_PLACEHOLDER.to_string(),
            text: UNKNOWN_PLACEHOLDER.to_string(),
        }
    }
}

/// Outcome of a successful `describe` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DescribeResult {
    Building(BuildingInfo),
    Settlement(SettlementInfo),
    NotFound(NotFoundInfo),
}

impl DescribeResult {
    pub fn not_found() -> Self {
        Self::NotFound(NotFoundInfo::default())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
