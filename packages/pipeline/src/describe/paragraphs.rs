//! How many leading paragraphs of an article to feed the model.

use std::collections::HashMap;

use spadchyna_harvester::normalize_title;

use crate::describe::types::SubjectType;
use crate::error::{PipelineError, Result};

pub const BUILDING_PARAGRAPHS: usize = 1;
pub const SETTLEMENT_PARAGRAPHS: usize = 2;

/// Titles whose lead is too short to be useful with the default count.
const BUILTIN_OVERRIDES: &[(&str, usize)] = &[("Горадня", 4)];

/// Paragraph counts per subject type, with per-title overrides.
///
/// An override wins over the subject-type default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphPolicy {
    building: usize,
    settlement: usize,
    overrides: HashMap<String, usize>,
}

impl Default for ParagraphPolicy {
    fn default() -> Self {
        let mut policy = Self {
            building: BUILDING_PARAGRAPHS,
            settlement: SETTLEMENT_PARAGRAPHS,
            overrides: HashMap::new(),
        };
        for (title, count) in BUILTIN_OVERRIDES {
            policy = policy.with_override(*title, *count);
        }
        policy
    }
}

impl ParagraphPolicy {
    /// Add or replace the override for `title`.
    pub fn with_override(mut self, title: impl AsRef<str>, paragraphs: usize) -> Self {
        self.overrides
            .insert(normalize_title(title.as_ref()), paragraphs);
        self
    }

    /// Merge `title=count` pairs, separated by commas (e.g. `Менск=3,Полацак=2`).
    pub fn with_overrides_list(mut self, list: &str) -> Result<Self> {
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (title, count) = entry.split_once('=').ok_or_else(|| {
                PipelineError::Config(format!("paragraph override '{entry}' is not title=count"))
            })?;
            let count: usize = count.trim().parse().map_err(|_| {
                PipelineError::Config(format!(
                    "paragraph override '{entry}' has a non-numeric count"
                ))
            })?;
            if title.trim().is_empty() || count == 0 {
                return Err(PipelineError::Config(format!(
                    "paragraph override '{entry}' needs a title and a positive count"
                )));
            }
            self = self.with_override(title, count);
        }
        Ok(self)
    }

    /// Paragraph count for a request.
    pub fn paragraphs_for(&self, title: &str, subject_type: SubjectType) -> usize {
        if let Some(count) = self.overrides.get(&normalize_title(title)) {
            return *count;
        }
        match subject_type {
            SubjectType::Building => self.building,
            SubjectType::Settlement => self.settlement,
        }
    }
}
