use crate::models::domain::{AudienceGroup, Difficulty, PromptMaterial};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use serde_json::{json, Value};

    /// Creates a stored prompt in the given scope
    pub fn test_prompt(group: AudienceGroup, difficulty: Difficulty, order: i32) -> PromptMaterial {
        PromptMaterial::new(
            group,
            difficulty,
            &format!("Prompt {}", order),
            "Write a prompt that summarizes the attached memo.",
            "A prompt naming the audience, the goal and the output format.",
            order,
        )
    }

    /// Items as a provider would return them after normalization
    pub fn test_generated_items(difficulty: Difficulty) -> Vec<Value> {
        vec![
            json!({
                "title": "Meeting recap",
                "content": "Ask the AI to recap a meeting for absent colleagues.",
                "expected_answer": "A prompt with attendees, decisions and next steps.",
                "difficulty": difficulty.as_str(),
            }),
            json!({
                "title": "Customer reply",
                "content": "Ask the AI to draft a polite reply to a complaint.",
                "expected_answer": "A prompt fixing tone, length and the apology.",
                "difficulty": difficulty.as_str(),
            }),
        ]
    }
}

#[cfg(test)]
pub mod in_memory {
    use std::{collections::HashMap, sync::Arc};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use super::*;
    use crate::{
        errors::{AppError, AppResult},
        models::domain::GroupAccount,
        repositories::{GroupRepository, PromptRepository},
    };

    #[derive(Default)]
    pub struct InMemoryPromptRepository {
        prompts: Arc<RwLock<HashMap<String, PromptMaterial>>>,
    }

    #[async_trait]
    impl PromptRepository for InMemoryPromptRepository {
        async fn list_by_group_and_difficulty(
            &self,
            group: AudienceGroup,
            difficulty: Difficulty,
        ) -> AppResult<Vec<PromptMaterial>> {
            let prompts = self.prompts.read().await;
            let mut items: Vec<_> = prompts
                .values()
                .filter(|p| p.audience_group == group && p.difficulty == difficulty)
                .cloned()
                .collect();
            items.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
            Ok(items)
        }

        async fn find_by_id(&self, id: &str) -> AppResult<Option<PromptMaterial>> {
            Ok(self.prompts.read().await.get(id).cloned())
        }

        async fn insert(&self, prompt: PromptMaterial) -> AppResult<PromptMaterial> {
            self.prompts
                .write()
                .await
                .insert(prompt.id.clone(), prompt.clone());
            Ok(prompt)
        }

        async fn insert_many(
            &self,
            prompts: Vec<PromptMaterial>,
        ) -> AppResult<Vec<PromptMaterial>> {
            let mut store = self.prompts.write().await;
            for prompt in &prompts {
                store.insert(prompt.id.clone(), prompt.clone());
            }
            Ok(prompts)
        }

        async fn update(&self, prompt: PromptMaterial) -> AppResult<PromptMaterial> {
            let mut store = self.prompts.write().await;
            if !store.contains_key(&prompt.id) {
                return Err(AppError::NotFound(format!(
                    "Prompt with id '{}' not found",
                    prompt.id
                )));
            }
            store.insert(prompt.id.clone(), prompt.clone());
            Ok(prompt)
        }

        async fn delete(&self, id: &str) -> AppResult<bool> {
            Ok(self.prompts.write().await.remove(id).is_some())
        }

        async fn max_order(
            &self,
            group: AudienceGroup,
            difficulty: Difficulty,
        ) -> AppResult<Option<i32>> {
            let prompts = self.prompts.read().await;
            Ok(prompts
                .values()
                .filter(|p| p.audience_group == group && p.difficulty == difficulty)
                .map(|p| p.order)
                .max())
        }
    }

    #[derive(Default)]
    pub struct InMemoryGroupRepository {
        accounts: Arc<RwLock<HashMap<AudienceGroup, GroupAccount>>>,
    }

    #[async_trait]
    impl GroupRepository for InMemoryGroupRepository {
        async fn find_by_group(&self, group: AudienceGroup) -> AppResult<Option<GroupAccount>> {
            Ok(self.accounts.read().await.get(&group).cloned())
        }

        async fn upsert(&self, account: GroupAccount) -> AppResult<GroupAccount> {
            self.accounts
                .write()
                .await
                .insert(account.audience_group, account.clone());
            Ok(account)
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use super::in_memory::{InMemoryGroupRepository, InMemoryPromptRepository};
    use crate::{
        app_state::AppState,
        config::{Config, GenerationConfig},
        services::generation_service::GenerationService,
    };

    /// App state over in-memory repositories and the given generation service
    pub fn test_app_state_with(generation_service: GenerationService) -> AppState {
        AppState::from_parts(
            Config::test_config(),
            Arc::new(InMemoryPromptRepository::default()),
            Arc::new(InMemoryGroupRepository::default()),
            generation_service,
        )
    }

    pub fn test_app_state() -> AppState {
        test_app_state_with(GenerationService::new(&GenerationConfig::test_config()))
    }

    pub fn admin_bearer(state: &AppState) -> String {
        let token = state
            .auth_service
            .jwt()
            .create_admin_token()
            .expect("admin token");
        format!("Bearer {}", token)
    }

    pub fn learner_bearer(state: &AppState, group: crate::models::domain::AudienceGroup) -> String {
        let token = state
            .auth_service
            .jwt()
            .create_learner_token(group)
            .expect("learner token");
        format!("Bearer {}", token)
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::in_memory::InMemoryPromptRepository;
    use super::*;
    use crate::repositories::PromptRepository;

    #[test]
    fn test_fixtures_generated_items_echo_difficulty() {
        let items = test_generated_items(Difficulty::Advanced);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item["difficulty"] == "advanced"));
    }

    #[tokio::test]
    async fn test_in_memory_repository_orders_within_scope() {
        let repo = InMemoryPromptRepository::default();
        repo.insert(test_prompt(AudienceGroup::School, Difficulty::Beginner, 2))
            .await
            .unwrap();
        repo.insert(test_prompt(AudienceGroup::School, Difficulty::Beginner, 0))
            .await
            .unwrap();
        repo.insert(test_prompt(AudienceGroup::AdultLearner, Difficulty::Beginner, 1))
            .await
            .unwrap();

        let listed = repo
            .list_by_group_and_difficulty(AudienceGroup::School, Difficulty::Beginner)
            .await
            .unwrap();
        let orders: Vec<i32> = listed.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![0, 2]);
        assert_eq!(
            repo.max_order(AudienceGroup::School, Difficulty::Beginner)
                .await
                .unwrap(),
            Some(2)
        );
    }
}
