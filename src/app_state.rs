use std::{sync::Arc, time::Duration};

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        GroupRepository, MongoGroupRepository, MongoPromptRepository, PromptRepository,
    },
    services::{
        auth_service::AuthService, generation_service::GenerationService,
        prompt_service::PromptService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub prompt_service: Arc<PromptService>,
    pub generation_service: Arc<GenerationService>,
    pub auth_service: Arc<AuthService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let prompt_repository = Arc::new(MongoPromptRepository::new(&db));
        prompt_repository.ensure_indexes().await?;

        let group_repository = Arc::new(MongoGroupRepository::new(&db));
        group_repository.ensure_indexes().await?;

        let generation_service = GenerationService::new(&config.generation);

        Ok(Self::from_parts(
            config,
            prompt_repository,
            group_repository,
            generation_service,
        ))
    }

    pub fn from_parts(
        config: Config,
        prompt_repository: Arc<dyn PromptRepository>,
        group_repository: Arc<dyn GroupRepository>,
        generation_service: GenerationService,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            prompt_service: Arc::new(PromptService::new(prompt_repository)),
            generation_service: Arc::new(generation_service),
            auth_service: Arc::new(AuthService::new(
                group_repository,
                jwt,
                &config.admin_password,
            )),
            config: Arc::new(config),
        }
    }

    pub fn generation_deadline(&self) -> Duration {
        Duration::from_secs(self.config.generation.timeout_secs)
    }
}
