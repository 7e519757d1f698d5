use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::{GenerateResponse, GenerationOutcome},
        dto::request::GenerateRequestDto,
    },
};

/// Generation failures are part of the contract and come back as
/// `200 { success: false, error, category }`. Only a blank topic and
/// authorization problems are HTTP errors.
#[post("/prompts/generate")]
pub async fn generate_prompts(
    state: web::Data<AppState>,
    request: web::Json<GenerateRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let request = request.into_inner();
    request.validate()?;

    let outcome = match request.into_generation_request() {
        Ok(request) => {
            state
                .generation_service
                .generate_within(request, state.generation_deadline())
                .await
        }
        Err(err) => GenerationOutcome::from(err),
    };

    Ok(HttpResponse::Ok().json(GenerateResponse::from(outcome)))
}
