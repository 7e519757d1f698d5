use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::domain::AudienceGroup;

/// Shared learner credential for one audience group.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupAccount {
    pub audience_group: AudienceGroup,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Compare `password` against a stored digest without short-circuiting.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    let candidate = hash_password(password);
    candidate.len() == password_hash.len()
        && candidate
            .bytes()
            .zip(password_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

impl GroupAccount {
    pub fn new(audience_group: AudienceGroup, password: &str) -> Self {
        GroupAccount {
            audience_group,
            password_hash: hash_password(password),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }
}
