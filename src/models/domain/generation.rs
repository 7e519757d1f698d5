use async_graphql::SimpleObject;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;

use crate::{
    errors::{FailureCategory, GenerationError},
    models::domain::Difficulty,
};

pub const DEFAULT_ITEM_COUNT: u32 = 3;

static DATA_URI_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+);base64,")
        .expect("DATA_URI_PREFIX is a valid regex pattern")
});

/// Parameters of one generation call. Lives for the duration of the call only.
#[derive(Clone, Debug, Default)]
pub struct GenerationRequest {
    pub provider: String,
    pub topic: String,
    pub count: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub audience_group: Option<String>,
    pub credential: Option<SecretString>,
    /// Base64 data URI, e.g. `data:image/png;base64,iVBOR...`
    pub image: Option<String>,
}

impl GenerationRequest {
    pub fn new(provider: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            topic: topic.into(),
            ..Default::default()
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_audience_group(mut self, group: impl Into<String>) -> Self {
        self.audience_group = Some(group.into());
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(SecretString::from(credential.into()));
        self
    }

    pub fn with_image(mut self, data_uri: impl Into<String>) -> Self {
        self.image = Some(data_uri.into());
        self
    }

    /// Absent or zero counts become the default of three.
    pub fn effective_count(&self) -> u32 {
        match self.count {
            Some(count) if count > 0 => count,
            _ => DEFAULT_ITEM_COUNT,
        }
    }

    pub fn effective_difficulty(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    pub fn from_data_uri(uri: &str) -> Result<Self, GenerationError> {
        let captures = DATA_URI_PREFIX.captures(uri).ok_or_else(|| {
            GenerationError::MalformedImage("expected a data:<mime>;base64,<payload> URI".to_string())
        })?;

        let mime_type = captures[1].to_string();
        let data = uri
            .split_once(',')
            .map(|(_, payload)| payload.trim())
            .unwrap_or_default();

        if data.is_empty() {
            return Err(GenerationError::MalformedImage(
                "data URI carries no payload".to_string(),
            ));
        }

        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Result of one generation call. A batch either validates as a whole or fails.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationOutcome {
    Success(Vec<Value>),
    Failure {
        category: FailureCategory,
        message: String,
    },
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }

    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            GenerationOutcome::Success(_) => None,
            GenerationOutcome::Failure { category, .. } => Some(*category),
        }
    }
}

impl From<GenerationError> for GenerationOutcome {
    fn from(err: GenerationError) -> Self {
        GenerationOutcome::Failure {
            category: err.category(),
            message: err.user_message(),
        }
    }
}

/// Wire shape of the invocation contract: `{ success, data }` or `{ success, error }`.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FailureCategory>,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Success(items) => GenerateResponse {
                success: true,
                data: Some(items),
                error: None,
                category: None,
            },
            GenerationOutcome::Failure { category, message } => GenerateResponse {
                success: false,
                data: None,
                error: Some(message),
                category: Some(category),
            },
        }
    }
}
