use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::AudienceGroup,
};

pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Admins see every group; learners only their own.
pub fn require_group_access(claims: &Claims, group: AudienceGroup) -> AppResult<()> {
    if claims.is_admin() || claims.audience_group == Some(group) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "You do not have access to the '{}' group",
        group
    )))
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
