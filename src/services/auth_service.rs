use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::{
    auth::{JwtService, Role},
    errors::{AppError, AppResult},
    models::{
        domain::{
            group_account::{hash_password, verify_password},
            AudienceGroup, GroupAccount,
        },
        dto::{
            request::{AdminLoginRequest, LearnerLoginRequest, SetGroupPasswordRequest},
            response::{LoginResponse, MessageResponse},
        },
    },
    repositories::GroupRepository,
};

/// Shared-password login for learner groups and the administrator.
pub struct AuthService {
    groups: Arc<dyn GroupRepository>,
    jwt: JwtService,
    admin_password_hash: String,
}

impl AuthService {
    pub fn new(groups: Arc<dyn GroupRepository>, jwt: JwtService, admin_password: &SecretString) -> Self {
        Self {
            groups,
            jwt,
            admin_password_hash: hash_password(admin_password.expose_secret()),
        }
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub async fn login_admin(&self, request: AdminLoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        if !verify_password(&self.admin_password_hash, &request.password) {
            log::warn!("Rejected admin login attempt");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(LoginResponse {
            token: self.jwt.create_admin_token()?,
            role: Role::Admin,
            audience_group: None,
            expires_in_hours: self.jwt.expiration_hours(),
        })
    }

    pub async fn login_learner(&self, request: LearnerLoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let account = self.groups.find_by_group(request.group).await?;
        let accepted = account.is_some_and(|account| account.verify(&request.password));
        if !accepted {
            log::warn!("Rejected learner login for group {}", request.group);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        log::info!("Learner logged in to group {}", request.group);
        Ok(LoginResponse {
            token: self.jwt.create_learner_token(request.group)?,
            role: Role::Learner,
            audience_group: Some(request.group),
            expires_in_hours: self.jwt.expiration_hours(),
        })
    }

    pub async fn set_group_password(
        &self,
        group: AudienceGroup,
        request: SetGroupPasswordRequest,
    ) -> AppResult<MessageResponse> {
        request.validate()?;

        self.groups
            .upsert(GroupAccount::new(group, &request.password))
            .await?;

        log::info!("Updated shared password for group {}", group);
        Ok(MessageResponse::new(format!(
            "Password for group '{}' updated",
            group
        )))
    }
}
