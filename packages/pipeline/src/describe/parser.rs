//! Positional parsing of free-text completions into typed fields.
//!
//! The model is asked for a fixed number of lines; which line holds which
//! field is the only contract. Nothing checks that a field *looks* right, so
//! a drifting model shows up here as wrong values, or as
//! [`PipelineError::MalformedOutput`] when lines are missing.

use crate::describe::types::{BuildingInfo, DescribeResult, SettlementInfo, SubjectType};
use crate::error::{PipelineError, Result};

/// Foreign place names the model prefers, mapped to the Belarusian historical
/// names. Applied in order, literally and case-sensitively.
pub const PLACE_NAME_CORRECTIONS: &[(&str, &str)] = &[("Vilnius", "Vilnia"), ("Neris", "Viliya")];

/// Maps completion text onto the result for one subject type.
pub trait ResponseParser {
    type Output;

    fn parse(&self, completion: &str) -> Result<Self::Output>;
}

/// Line 1 = style(s), line 2 = construction era.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildingParser;

/// Line 1 = population, text = line 3 (or line 2 when the blank separator is missing).
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementParser;

impl ResponseParser for BuildingParser {
    type Output = BuildingInfo;

    fn parse(&self, completion: &str) -> Result<BuildingInfo> {
        let lines = split_lines(completion);
        let [style, time, ..] = lines.as_slice() else {
            return Err(malformed(SubjectType::Building, 2, lines.len()));
        };
        Ok(BuildingInfo {
            style: (*style).to_string(),
            time: (*time).to_string(),
        })
    }
}

impl ResponseParser for SettlementParser {
    type Output = SettlementInfo;

    fn parse(&self, completion: &str) -> Result<SettlementInfo> {
        let lines = split_lines(completion);
        if lines.len() < 2 {
            return Err(malformed(SubjectType::Settlement, 2, lines.len()));
        }
        // Expected shape is population, blank line, text. Some replies skip
        // the blank line, in which case the text sits on line 2.
        let text_index = if lines.len() > 2 { 2 } else { 1 };
        Ok(SettlementInfo {
            population: lines[0].to_string(),
            text: correct_place_names(lines[text_index]),
        })
    }
}

/// Parse a completion according to the subject type of the request.
pub fn parse(completion: &str, subject_type: SubjectType) -> Result<DescribeResult> {
    match subject_type {
        SubjectType::Building => BuildingParser.parse(completion).map(DescribeResult::Building),
        SubjectType::Settlement => SettlementParser
            .parse(completion)
            .map(DescribeResult::Settlement),
    }
}

/// Split on `\n` and trim each piece. Trailing empty pieces are kept.
pub fn split_lines(completion: &str) -> Vec<&str> {
    completion.split('\n').map(str::trim).collect()
}

/// Replace foreign place names with their Belarusian historical forms.
pub fn correct_place_names(text: &str) -> String {
    PLACE_NAME_CORRECTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn malformed(subject: SubjectType, expected: usize, got: usize) -> PipelineError {
    PipelineError::MalformedOutput {
        subject: subject.to_string(),
        expected,
        got,
    }
}
