pub mod auth_service;
pub mod generation_service;
pub mod prompt_builder;
pub mod prompt_service;
pub mod providers;
