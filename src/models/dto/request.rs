use async_graphql::InputObject;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::{
    errors::GenerationError,
    models::domain::{AudienceGroup, Difficulty, GenerationRequest},
};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Topic is required".into()));
    }
    Ok(())
}

/// Body of a generation call, mirroring the UI's invocation contract.
#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestDto {
    pub provider: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub topic: String,

    #[serde(default)]
    pub count: Option<u32>,

    #[serde(default)]
    pub difficulty: Option<String>,

    #[serde(default)]
    pub audience_group: Option<String>,

    #[serde(default)]
    #[graphql(secret)]
    pub credential: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl GenerateRequestDto {
    pub fn into_generation_request(self) -> Result<GenerationRequest, GenerationError> {
        let difficulty = self
            .difficulty
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(str::parse::<Difficulty>)
            .transpose()?;

        let mut request = GenerationRequest::new(self.provider, self.topic);
        request.count = self.count;
        request.difficulty = difficulty;
        request.audience_group = self.audience_group;
        request.image = self.image.filter(|uri| !uri.trim().is_empty());
        if let Some(credential) = self.credential.filter(|c| !c.trim().is_empty()) {
            request = request.with_credential(credential);
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreatePromptRequest {
    pub audience_group: AudienceGroup,

    pub difficulty: Difficulty,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[serde(default)]
    pub expected_answer: String,

    #[validate(url)]
    #[serde(default)]
    pub image_url: Option<String>,

    #[validate(url)]
    #[serde(default)]
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, InputObject)]
pub struct UpdatePromptRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    pub expected_answer: Option<String>,

    pub difficulty: Option<Difficulty>,

    #[validate(url)]
    pub image_url: Option<String>,

    #[validate(url)]
    pub attachment_url: Option<String>,

    pub order: Option<i32>,
}

/// A normalized batch an administrator chose to keep.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveGeneratedRequest {
    pub audience_group: AudienceGroup,
    pub difficulty: Difficulty,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptQuery {
    pub group: AudienceGroup,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LearnerLoginRequest {
    pub group: AudienceGroup,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetGroupPasswordRequest {
    #[validate(length(min = 4, max = 128))]
    pub password: String,
}
