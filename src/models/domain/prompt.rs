use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{AudienceGroup, Difficulty, LearningItem};

/// A stored learning material, shown to learners of one audience group.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct PromptMaterial {
    pub id: String,
    pub audience_group: AudienceGroup,
    pub difficulty: Difficulty,
    pub title: String,
    pub content: String,
    pub expected_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    pub order: i32, // position within (audience_group, difficulty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl PromptMaterial {
    pub fn new(
        audience_group: AudienceGroup,
        difficulty: Difficulty,
        title: &str,
        content: &str,
        expected_answer: &str,
        order: i32,
    ) -> Self {
        let now = Utc::now();
        PromptMaterial {
            id: Uuid::new_v4().to_string(),
            audience_group,
            difficulty,
            title: title.to_string(),
            content: content.to_string(),
            expected_answer: expected_answer.to_string(),
            image_url: None,
            attachment_url: None,
            order,
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn from_learning_item(
        item: &LearningItem,
        audience_group: AudienceGroup,
        difficulty: Difficulty,
        order: i32,
    ) -> Self {
        Self::new(
            audience_group,
            difficulty,
            &item.title,
            &item.content,
            &item.expected_answer,
            order,
        )
    }
}
