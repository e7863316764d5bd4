use spadchyna_harvester::ArticleExcerpt;

use crate::describe::types::{InfoRequest, Language, SubjectType};
use crate::error::{PipelineError, Result};

const BUILDING_INSTRUCTION: &str = include_str!("../../prompts/building_instruction.txt");
const SETTLEMENT_INSTRUCTION: &str = include_str!("../../prompts/settlement_instruction.txt");
const SETTLEMENT_EXAMPLE: &str = include_str!("../../prompts/settlement_example.txt");

/// Output budget for building answers (two short lines).
pub const BUILDING_MAX_TOKENS: u32 = 256;

/// Output budget for settlement answers (population plus a short summary).
pub const SETTLEMENT_MAX_TOKENS: u32 = 1024;

/// Fully rendered instruction plus the output budget it was written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub max_tokens: u32,
}

/// Build the prompt for a request whose article was found.
pub fn build_prompt(excerpt: &ArticleExcerpt, request: &InfoRequest) -> Result<Prompt> {
    match request.subject_type {
        SubjectType::Building => Ok(build_building_prompt(excerpt, request.language)),
        SubjectType::Settlement => {
            build_settlement_prompt(excerpt, request.language, request.latin_title())
        }
    }
}

/// Excerpt followed by the two-line style/era instruction.
pub fn build_building_prompt(excerpt: &ArticleExcerpt, language: Language) -> Prompt {
    let instruction = BUILDING_INSTRUCTION
        .trim_end()
        .replace("{language}", language_adjective(language));

    Prompt {
        text: format!("{}\n{instruction}", excerpt.text()),
        max_tokens: BUILDING_MAX_TOKENS,
    }
}

/// Excerpt followed by the population/summary instruction and worked example.
///
/// Foreign-language answers need the Latin name of the settlement so the
/// model does not transliterate it on its own.
pub fn build_settlement_prompt(
    excerpt: &ArticleExcerpt,
    language: Language,
    latin_title: Option<&str>,
) -> Result<Prompt> {
    let language_clause = match (language, latin_title) {
        (Language::Local, _) => {
            "Усе адказы павінны быць прадстаўлены толькі на беларускай мове.".to_string()
        }
        (Language::Foreign, Some(name)) => format!(
            "Усе адказы павінны быць прадстаўлены толькі на ангельскай мове. \
             Name of the city in English is - {name}."
        ),
        (Language::Foreign, None) => {
            return Err(PipelineError::InvalidInput(format!(
                "no Latin title for '{}' in a foreign-language request",
                excerpt.title
            )))
        }
    };

    let instruction = SETTLEMENT_INSTRUCTION
        .trim_end()
        .replace("{example}", SETTLEMENT_EXAMPLE.trim_end())
        .replace("{language_clause}", &language_clause);

    Ok(Prompt {
        text: format!("{}\n{instruction}", excerpt.text()),
        max_tokens: SETTLEMENT_MAX_TOKENS,
    })
}

fn language_adjective(language: Language) -> &'static str {
    match language {
        Language::Local => "беларускай",
        Language::Foreign => "ангельскай",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excerpt(title: &str, text: &str) -> ArticleExcerpt {
        ArticleExcerpt::found(title, text.split('\n').map(str::to_string).collect())
    }

    #[test]
    fn test_building_prompt_structure() {
        let excerpt = excerpt("Мірскі замак", "Мірскі замак — помнік архітэктуры.");
        let prompt = build_building_prompt(&excerpt, Language::Local);

        assert!(prompt.text.starts_with("Мірскі замак — помнік архітэктуры.\n"));
        assert!(prompt.text.contains("Першы радок: толькі назвы стыляў"));
        assert!(prompt.text.contains("Другі радок: час пабудовы помніка"));
        assert!(prompt.text.contains("\"XVII ст. - XVIII ст.\""));
        assert!(prompt.text.ends_with("толькі на беларускай мове."));
        assert_eq!(prompt.max_tokens, BUILDING_MAX_TOKENS);
    }

    #[test]
    fn test_building_prompt_names_regional_schools() {
        let prompt = build_building_prompt(&excerpt("Каложа", "Каложа."), Language::Local);
        assert!(prompt.text.contains("Гарадзенскай школы дойлідства"));
        assert!(prompt.text.contains("Полацкай школы дойлідства"));
        assert!(prompt.text.contains("Абарончага дойлідства"));
    }

    #[test]
    fn test_building_prompt_foreign_language() {
        let prompt = build_building_prompt(&excerpt("Каложа", "Каложа."), Language::Foreign);
        assert!(prompt.text.ends_with("толькі на ангельскай мове."));
        assert!(!prompt.text.contains("беларускай мове"));
        assert!(!prompt.text.contains("{language}"));
    }

    #[test]
    fn test_settlement_prompt_local() {
        let excerpt = excerpt("Наваградак", "Наваградак — горад.\nСталіца ВКЛ.");
        let prompt =
            build_settlement_prompt(&excerpt, Language::Local, None).expect("local prompt");

        assert!(prompt.text.starts_with("Наваградак — горад.\nСталіца ВКЛ.\n1. Укажыце"));
        assert!(prompt.text.contains("'15 тыс. чал.'"));
        assert!(prompt.text.contains(SETTLEMENT_EXAMPLE.trim_end()));
        assert!(prompt.text.contains("на тэрыторыі іншай краіны"));
        assert!(prompt.text.ends_with("толькі на беларускай мове."));
        assert!(!prompt.text.contains("Name of the city"));
        assert_eq!(prompt.max_tokens, SETTLEMENT_MAX_TOKENS);
    }

    #[test]
    fn test_settlement_prompt_foreign_includes_latin_name() {
        let excerpt = excerpt("Вільня", "Вільня — гістарычная сталіца.");
        let prompt = build_settlement_prompt(&excerpt, Language::Foreign, Some("Vilnia"))
            .expect("foreign prompt");

        assert!(prompt.text.contains(SETTLEMENT_EXAMPLE.trim_end()));
        assert!(prompt
            .text
            .ends_with("толькі на ангельскай мове. Name of the city in English is - Vilnia."));
    }

    #[test]
    fn test_settlement_prompt_foreign_without_latin_name() {
        let excerpt = excerpt("Вільня", "Вільня.");
        assert!(matches!(
            build_settlement_prompt(&excerpt, Language::Foreign, None),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_unrendered_placeholders() {
        let excerpt = excerpt("Заслаўе", "Заслаўе.");
        let request =
            InfoRequest::settlement("Заслаўе", Language::Foreign, Some("Zaslawye".into()));
        let prompt = build_prompt(&excerpt, &request).expect("prompt");
        assert!(!prompt.text.contains("{example}"));
        assert!(!prompt.text.contains("{language_clause}"));
    }

    #[test]
    fn test_build_prompt_dispatches_on_subject_type() {
        let excerpt = excerpt("Нясвіж", "Нясвіж.");
        let building = build_prompt(&excerpt, &InfoRequest::building("Нясвіж", Language::Local))
            .expect("building");
        let settlement = build_prompt(
            &excerpt,
            &InfoRequest::settlement("Нясвіж", Language::Local, None),
        )
        .expect("settlement");

        assert_eq!(building.max_tokens, BUILDING_MAX_TOKENS);
        assert_eq!(settlement.max_tokens, SETTLEMENT_MAX_TOKENS);
        assert_ne!(building.text, settlement.text);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let excerpt = excerpt("Нясвіж", "Нясвіж.");
        let request = InfoRequest::settlement("Нясвіж", Language::Local, None);
        assert_eq!(
            build_prompt(&excerpt, &request).expect("first"),
            build_prompt(&excerpt, &request).expect("second")
        );
    }
}
