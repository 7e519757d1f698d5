pub mod group_repository;
pub mod prompt_repository;

pub use group_repository::{GroupRepository, MongoGroupRepository};
pub use prompt_repository::{MongoPromptRepository, PromptRepository};
