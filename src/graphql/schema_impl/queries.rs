use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_group_access},
    errors::AppResult,
    models::domain::{
        audience::AudienceProfileDto, AudienceGroup, Difficulty, PromptMaterial,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn prompts(
        &self,
        ctx: &Context<'_>,
        group: AudienceGroup,
        difficulty: Option<Difficulty>,
    ) -> AppResult<Vec<PromptMaterial>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_group_access(&claims, group)?;

        state
            .prompt_service
            .list_prompts(group, difficulty.unwrap_or_default())
            .await
    }

    async fn prompt(&self, ctx: &Context<'_>, id: String) -> AppResult<PromptMaterial> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let prompt = state.prompt_service.get_prompt(&id).await?;
        require_group_access(&claims, prompt.audience_group)?;
        Ok(prompt)
    }

    /// Audience profiles used to tailor generated material. Public.
    async fn audience_profiles(&self) -> Vec<AudienceProfileDto> {
        AudienceGroup::ALL
            .iter()
            .map(|group| AudienceProfileDto::from(group.profile()))
            .collect()
    }
}
