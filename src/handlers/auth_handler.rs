use actix_web::{post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::AudienceGroup,
        dto::request::{AdminLoginRequest, LearnerLoginRequest, SetGroupPasswordRequest},
    },
};

#[post("/auth/login")]
pub async fn learner_login(
    state: web::Data<AppState>,
    request: web::Json<LearnerLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .auth_service
        .login_learner(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/auth/admin")]
pub async fn admin_login(
    state: web::Data<AppState>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.login_admin(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/groups/{group}/password")]
pub async fn set_group_password(
    state: web::Data<AppState>,
    group: web::Path<String>,
    request: web::Json<SetGroupPasswordRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let group = AudienceGroup::from_id(&group)
        .ok_or_else(|| AppError::ValidationError(format!("Unknown audience group '{}'", group)))?;
    let response = state
        .auth_service
        .set_group_password(group, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
