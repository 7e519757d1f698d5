pub mod auth_handler;
pub mod generation_handler;
pub mod health_handler;
pub mod prompt_handler;

use actix_web::web;

pub use auth_handler::{admin_login, learner_login, set_group_password};
pub use generation_handler::generate_prompts;
pub use health_handler::health_check;
pub use prompt_handler::{
    create_prompt, delete_prompt, list_prompts, save_generated_prompts, update_prompt,
};

/// Routes reachable without a token.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(learner_login)
        .service(admin_login);
}

/// Routes mounted under the authenticated `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_prompts)
        .service(save_generated_prompts)
        .service(list_prompts)
        .service(create_prompt)
        .service(update_prompt)
        .service(delete_prompt)
        .service(set_group_password);
}
