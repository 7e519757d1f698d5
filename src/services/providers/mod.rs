//! Generative-AI backends that turn a brief into raw response text.
//!
//! Each provider performs exactly one outbound request per call, with no
//! retries. Deadlines are left to the caller.

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::{errors::GenerationError, models::domain::ImagePayload};

pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::OpenAi];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(GenerationError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Everything a provider needs for one round trip.
#[derive(Debug, Clone)]
pub struct ProviderCall {
    pub brief: String,
    pub image: Option<ImagePayload>,
    pub api_key: SecretString,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Api(String),

    #[error("provider returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Gateway timeouts surface as a 504 status or a "504" somewhere in the message.
    pub fn is_timeout(&self) -> bool {
        match self {
            ProviderError::Timeout(_) => true,
            ProviderError::Status { status, .. } if *status == 504 => true,
            other => other.to_string().contains("504"),
        }
    }

    /// Upstream-supplied explanation, if there is one.
    pub fn message(&self) -> Option<String> {
        match self {
            ProviderError::Status { body, .. } if body.trim().is_empty() => None,
            ProviderError::Api(message) if message.trim().is_empty() => None,
            ProviderError::EmptyResponse => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn generate(&self, call: ProviderCall) -> Result<String, ProviderError>;
}
