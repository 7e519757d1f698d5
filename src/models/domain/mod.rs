pub mod audience;
pub mod difficulty;
pub mod generation;
pub mod group_account;
pub mod learning_item;
pub mod prompt;
pub use audience::{AudienceGroup, AudienceProfile};
pub use difficulty::Difficulty;
pub use generation::{GenerateResponse, GenerationOutcome, GenerationRequest, ImagePayload};
pub use group_account::GroupAccount;
pub use learning_item::LearningItem;
pub use prompt::PromptMaterial;
