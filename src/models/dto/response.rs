use async_graphql::SimpleObject;
use serde::Serialize;

use crate::{auth::Role, models::domain::AudienceGroup};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_group: Option<AudienceGroup>,
    pub expires_in_hours: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
