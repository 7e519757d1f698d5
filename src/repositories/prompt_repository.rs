use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::{FindOneOptions, FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, PROMPTS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{AudienceGroup, Difficulty, PromptMaterial},
};

#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Materials of one group and difficulty, ordered by `order` then `created_at`.
    async fn list_by_group_and_difficulty(
        &self,
        group: AudienceGroup,
        difficulty: Difficulty,
    ) -> AppResult<Vec<PromptMaterial>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<PromptMaterial>>;
    async fn insert(&self, prompt: PromptMaterial) -> AppResult<PromptMaterial>;
    async fn insert_many(&self, prompts: Vec<PromptMaterial>) -> AppResult<Vec<PromptMaterial>>;
    async fn update(&self, prompt: PromptMaterial) -> AppResult<PromptMaterial>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    /// Highest `order` within a group and difficulty, if any material exists.
    async fn max_order(&self, group: AudienceGroup, difficulty: Difficulty) -> AppResult<Option<i32>>;
}

pub struct MongoPromptRepository {
    collection: Collection<PromptMaterial>,
}

fn scope_filter(
    group: AudienceGroup,
    difficulty: Difficulty,
) -> AppResult<mongodb::bson::Document> {
    let group = to_bson(&group)
        .map_err(|e| AppError::InternalError(format!("BSON serialization error: {}", e)))?;
    let difficulty = to_bson(&difficulty)
        .map_err(|e| AppError::InternalError(format!("BSON serialization error: {}", e)))?;
    Ok(doc! { "audience_group": group, "difficulty": difficulty })
}

impl MongoPromptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(PROMPTS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for prompts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let scope_index = IndexModel::builder()
            .keys(doc! { "audience_group": 1, "difficulty": 1, "order": 1 })
            .options(
                IndexOptions::builder()
                    .name("group_difficulty_order".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(scope_index).await?;

        log::info!("Successfully created indexes for prompts collection");
        Ok(())
    }
}

#[async_trait]
impl PromptRepository for MongoPromptRepository {
    async fn list_by_group_and_difficulty(
        &self,
        group: AudienceGroup,
        difficulty: Difficulty,
    ) -> AppResult<Vec<PromptMaterial>> {
        use futures::TryStreamExt;

        let find_options = FindOptions::builder()
            .sort(doc! { "order": 1, "created_at": 1 })
            .build();

        let cursor = self
            .collection
            .find(scope_filter(group, difficulty)?)
            .with_options(find_options)
            .await?;
        let items: Vec<PromptMaterial> = cursor.try_collect().await?;

        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<PromptMaterial>> {
        let prompt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(prompt)
    }

    async fn insert(&self, prompt: PromptMaterial) -> AppResult<PromptMaterial> {
        self.collection.insert_one(&prompt).await?;
        Ok(prompt)
    }

    async fn insert_many(&self, prompts: Vec<PromptMaterial>) -> AppResult<Vec<PromptMaterial>> {
        if prompts.is_empty() {
            return Ok(prompts);
        }
        self.collection.insert_many(&prompts).await?;
        Ok(prompts)
    }

    async fn update(&self, prompt: PromptMaterial) -> AppResult<PromptMaterial> {
        let result = self
            .collection
            .replace_one(doc! { "id": &prompt.id }, &prompt)
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Prompt with id '{}' not found",
                prompt.id
            )));
        }
        Ok(prompt)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn max_order(&self, group: AudienceGroup, difficulty: Difficulty) -> AppResult<Option<i32>> {
        let options = FindOneOptions::builder().sort(doc! { "order": -1 }).build();
        let last = self
            .collection
            .find_one(scope_filter(group, difficulty)?)
            .with_options(options)
            .await?;
        Ok(last.map(|prompt| prompt.order))
    }
}
