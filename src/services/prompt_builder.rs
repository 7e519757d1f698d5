use crate::{
    constants::generation_prompt::{difficulty_clause, IMAGE_CLAUSE, OUTPUT_CONTRACT},
    models::domain::{AudienceGroup, GenerationRequest},
};

/// Composes the natural-language brief sent to a provider. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct PromptRequestBuilder {
    locale: String,
}

impl PromptRequestBuilder {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn build(&self, request: &GenerationRequest) -> String {
        let profile = AudienceGroup::resolve(request.audience_group.as_deref()).profile();
        let count = request.effective_count();
        let difficulty = request.effective_difficulty();

        let mut sections = vec![
            format!("You are {}. Keep a {} tone.", profile.role, profile.tone),
            format!(
                "Audience: {} Typical subjects for this audience include {}.",
                profile.context, profile.topics
            ),
            format!(
                "Create exactly {} prompt-practice learning materials for this audience.",
                count
            ),
        ];

        if request.image.is_some() {
            sections.push(IMAGE_CLAUSE.to_string());
        }

        sections.push(format!("Topic: \"{}\"", request.topic.trim()));
        sections.push(format!(
            "Language: write every title, content and expected_answer in {locale}. Use another language only for technical terms that have no natural {locale} equivalent.",
            locale = self.locale
        ));
        sections.push(format!(
            "Difficulty: {}. {}",
            difficulty,
            difficulty_clause(difficulty)
        ));
        sections.push(format!(
            "{} Set \"difficulty\" to \"{}\" in every object.",
            OUTPUT_CONTRACT, difficulty
        ));

        sections.join("\n\n")
    }
}
