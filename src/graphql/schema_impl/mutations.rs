use async_graphql::{Context, Object};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_admin},
    errors::AppResult,
    models::{
        domain::{AudienceGroup, GenerateResponse, GenerationOutcome, PromptMaterial},
        dto::{
            request::{
                AdminLoginRequest, CreatePromptRequest, GenerateRequestDto, LearnerLoginRequest,
                UpdatePromptRequest,
            },
            response::LoginResponse,
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login(
        &self,
        ctx: &Context<'_>,
        group: AudienceGroup,
        password: String,
    ) -> AppResult<LoginResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .auth_service
            .login_learner(LearnerLoginRequest { group, password })
            .await
    }

    async fn admin_login(&self, ctx: &Context<'_>, password: String) -> AppResult<LoginResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .auth_service
            .login_admin(AdminLoginRequest { password })
            .await
    }

    /// Generation failures are reported in the result, not as GraphQL errors.
    async fn generate_prompts(
        &self,
        ctx: &Context<'_>,
        input: GenerateRequestDto,
    ) -> AppResult<GenerateResponse> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_admin(&claims)?;
        input.validate()?;

        let outcome = match input.into_generation_request() {
            Ok(request) => {
                state
                    .generation_service
                    .generate_within(request, state.generation_deadline())
                    .await
            }
            Err(err) => GenerationOutcome::from(err),
        };
        Ok(outcome.into())
    }

    async fn create_prompt(
        &self,
        ctx: &Context<'_>,
        input: CreatePromptRequest,
    ) -> AppResult<PromptMaterial> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_admin(&claims)?;

        state.prompt_service.create_prompt(input).await
    }

    async fn update_prompt(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdatePromptRequest,
    ) -> AppResult<PromptMaterial> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_admin(&claims)?;

        state.prompt_service.update_prompt(&id, input).await
    }

    async fn delete_prompt(&self, ctx: &Context<'_>, id: String) -> AppResult<bool> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_admin(&claims)?;

        state.prompt_service.delete_prompt(&id).await?;
        Ok(true)
    }
}
