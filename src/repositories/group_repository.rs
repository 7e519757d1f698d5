use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, GROUPS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{AudienceGroup, GroupAccount},
};

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_group(&self, group: AudienceGroup) -> AppResult<Option<GroupAccount>>;
    async fn upsert(&self, account: GroupAccount) -> AppResult<GroupAccount>;
}

pub struct MongoGroupRepository {
    collection: Collection<GroupAccount>,
}

impl MongoGroupRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(GROUPS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let group_index = IndexModel::builder()
            .keys(doc! { "audience_group": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("audience_group_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(group_index).await?;
        Ok(())
    }
}

fn group_filter(group: AudienceGroup) -> AppResult<mongodb::bson::Document> {
    let group = to_bson(&group)
        .map_err(|e| AppError::InternalError(format!("BSON serialization error: {}", e)))?;
    Ok(doc! { "audience_group": group })
}

#[async_trait]
impl GroupRepository for MongoGroupRepository {
    async fn find_by_group(&self, group: AudienceGroup) -> AppResult<Option<GroupAccount>> {
        let account = self.collection.find_one(group_filter(group)?).await?;
        Ok(account)
    }

    async fn upsert(&self, account: GroupAccount) -> AppResult<GroupAccount> {
        self.collection
            .replace_one(group_filter(account.audience_group)?, &account)
            .upsert(true)
            .await?;
        Ok(account)
    }
}
