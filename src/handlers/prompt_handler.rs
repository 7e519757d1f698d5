use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, require_group_access, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{CreatePromptRequest, PromptQuery, SaveGeneratedRequest, UpdatePromptRequest},
        response::MessageResponse,
    },
};

#[get("/prompts")]
pub async fn list_prompts(
    state: web::Data<AppState>,
    query: web::Query<PromptQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    require_group_access(&auth.0, query.group)?;

    let prompts = state
        .prompt_service
        .list_prompts(query.group, query.difficulty)
        .await?;
    Ok(HttpResponse::Ok().json(prompts))
}

#[post("/prompts")]
pub async fn create_prompt(
    state: web::Data<AppState>,
    request: web::Json<CreatePromptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let prompt = state
        .prompt_service
        .create_prompt(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(prompt))
}

#[put("/prompts/{id}")]
pub async fn update_prompt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdatePromptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let prompt = state
        .prompt_service
        .update_prompt(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(prompt))
}

#[delete("/prompts/{id}")]
pub async fn delete_prompt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state.prompt_service.delete_prompt(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("Prompt '{}' deleted", id))))
}

// Saves a generated batch the administrator accepted
#[post("/prompts/batch")]
pub async fn save_generated_prompts(
    state: web::Data<AppState>,
    request: web::Json<SaveGeneratedRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let saved = state
        .prompt_service
        .save_generated(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(saved))
}
