use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            learning_item::validate_items, AudienceGroup, Difficulty, PromptMaterial,
        },
        dto::request::{CreatePromptRequest, SaveGeneratedRequest, UpdatePromptRequest},
    },
    repositories::PromptRepository,
};

pub struct PromptService {
    repository: Arc<dyn PromptRepository>,
}

impl PromptService {
    pub fn new(repository: Arc<dyn PromptRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_prompts(
        &self,
        group: AudienceGroup,
        difficulty: Difficulty,
    ) -> AppResult<Vec<PromptMaterial>> {
        self.repository
            .list_by_group_and_difficulty(group, difficulty)
            .await
    }

    pub async fn get_prompt(&self, id: &str) -> AppResult<PromptMaterial> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prompt with id '{}' not found", id)))
    }

    async fn next_order(&self, group: AudienceGroup, difficulty: Difficulty) -> AppResult<i32> {
        Ok(self
            .repository
            .max_order(group, difficulty)
            .await?
            .map_or(0, |order| order + 1))
    }

    pub async fn create_prompt(&self, request: CreatePromptRequest) -> AppResult<PromptMaterial> {
        request.validate()?;

        let order = self
            .next_order(request.audience_group, request.difficulty)
            .await?;
        let mut prompt = PromptMaterial::new(
            request.audience_group,
            request.difficulty,
            request.title.trim(),
            &request.content,
            &request.expected_answer,
            order,
        );
        prompt.image_url = request.image_url;
        prompt.attachment_url = request.attachment_url;

        let prompt = self.repository.insert(prompt).await?;
        log::info!(
            "Created prompt {} in {}/{}",
            prompt.id,
            prompt.audience_group,
            prompt.difficulty
        );
        Ok(prompt)
    }

    pub async fn update_prompt(
        &self,
        id: &str,
        request: UpdatePromptRequest,
    ) -> AppResult<PromptMaterial> {
        request.validate()?;

        let mut prompt = self.get_prompt(id).await?;

        if let Some(title) = request.title {
            prompt.title = title.trim().to_string();
        }
        if let Some(content) = request.content {
            prompt.content = content;
        }
        if let Some(expected_answer) = request.expected_answer {
            prompt.expected_answer = expected_answer;
        }
        if let Some(difficulty) = request.difficulty {
            if difficulty != prompt.difficulty {
                prompt.order = self.next_order(prompt.audience_group, difficulty).await?;
                prompt.difficulty = difficulty;
            }
        }
        if request.image_url.is_some() {
            prompt.image_url = request.image_url;
        }
        if request.attachment_url.is_some() {
            prompt.attachment_url = request.attachment_url;
        }
        if let Some(order) = request.order {
            prompt.order = order;
        }
        prompt.modified_at = Some(Utc::now());

        self.repository.update(prompt).await
    }

    pub async fn delete_prompt(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Prompt with id '{}' not found",
                id
            )));
        }
        log::info!("Deleted prompt {}", id);
        Ok(())
    }

    /// Persist a generated batch after strict per-item validation. Items are
    /// appended after existing materials in the order the provider returned them.
    pub async fn save_generated(
        &self,
        request: SaveGeneratedRequest,
    ) -> AppResult<Vec<PromptMaterial>> {
        request.validate()?;

        let items = validate_items(&request.items, request.difficulty).map_err(|diagnostics| {
            let details: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
            AppError::ValidationError(format!(
                "Generated items failed validation: {}",
                details.join("; ")
            ))
        })?;

        let start = self
            .next_order(request.audience_group, request.difficulty)
            .await?;
        let prompts: Vec<PromptMaterial> = items
            .iter()
            .zip(start..)
            .map(|(item, order)| {
                PromptMaterial::from_learning_item(
                    item,
                    request.audience_group,
                    request.difficulty,
                    order,
                )
            })
            .collect();

        let saved = self.repository.insert_many(prompts).await?;
        log::info!(
            "Saved {} generated prompts to {}/{}",
            saved.len(),
            request.audience_group,
            request.difficulty
        );
        Ok(saved)
    }
}
