pub mod audience_profiles;
pub mod generation_prompt;
