use async_graphql::Enum;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::AudienceGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Learner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // "admin" or the audience group id
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_group: Option<AudienceGroup>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    fn issue(sub: String, role: Role, audience_group: Option<AudienceGroup>, hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(hours);

        Self {
            sub,
            role,
            audience_group,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn admin(expiration_hours: i64) -> Self {
        Self::issue("admin".to_string(), Role::Admin, None, expiration_hours)
    }

    pub fn learner(group: AudienceGroup, expiration_hours: i64) -> Self {
        Self::issue(group.id().to_string(), Role::Learner, Some(group), expiration_hours)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
