use std::{collections::HashMap, sync::Arc, time::Duration};

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;
use serde_json::Value;

use crate::{
    config::GenerationConfig,
    errors::GenerationError,
    models::domain::{Difficulty, GenerationOutcome, GenerationRequest, ImagePayload},
    services::{
        prompt_builder::PromptRequestBuilder,
        providers::{
            GeminiProvider, GenerationProvider, OpenAiProvider, ProviderCall, ProviderError,
            ProviderKind,
        },
    },
};

static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```[A-Za-z0-9_-]*").expect("OPENING_FENCE is a valid regex pattern")
});

const CLOSING_FENCE: &str = "```";

/// Default API keys, consulted only when the caller supplies none.
#[derive(Clone, Debug, Default)]
pub struct ProviderCredentials {
    defaults: HashMap<ProviderKind, SecretString>,
}

impl ProviderCredentials {
    pub fn from_config(config: &GenerationConfig) -> Self {
        let mut credentials = Self::default();
        if let Some(key) = &config.gemini_api_key {
            credentials = credentials.with_default(ProviderKind::Gemini, key.clone());
        }
        if let Some(key) = &config.openai_api_key {
            credentials = credentials.with_default(ProviderKind::OpenAi, key.clone());
        }
        credentials
    }

    pub fn with_default(mut self, kind: ProviderKind, key: SecretString) -> Self {
        self.defaults.insert(kind, key);
        self
    }

    /// Call-time value first, then the injected default.
    pub fn resolve(
        &self,
        kind: ProviderKind,
        explicit: Option<&SecretString>,
    ) -> Result<SecretString, GenerationError> {
        use secrecy::ExposeSecret;

        explicit
            .filter(|key| !key.expose_secret().trim().is_empty())
            .or_else(|| self.defaults.get(&kind))
            .cloned()
            .ok_or_else(|| GenerationError::MissingCredential(kind.to_string()))
    }
}

/// Routes a brief to the selected provider and normalizes what comes back.
pub struct GenerationService {
    builder: PromptRequestBuilder,
    credentials: ProviderCredentials,
    providers: HashMap<ProviderKind, Arc<dyn GenerationProvider>>,
}

impl GenerationService {
    pub fn new(config: &GenerationConfig) -> Self {
        let providers: Vec<Arc<dyn GenerationProvider>> = vec![
            Arc::new(GeminiProvider::new(config)),
            Arc::new(OpenAiProvider::new(config)),
        ];

        Self::with_providers(
            PromptRequestBuilder::new(config.locale.clone()),
            ProviderCredentials::from_config(config),
            providers,
        )
    }

    pub fn with_providers(
        builder: PromptRequestBuilder,
        credentials: ProviderCredentials,
        providers: Vec<Arc<dyn GenerationProvider>>,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.kind(), provider))
            .collect();

        Self {
            builder,
            credentials,
            providers,
        }
    }

    pub fn builder(&self) -> &PromptRequestBuilder {
        &self.builder
    }

    /// Send `brief` to `provider` and return its raw text. Exactly one outbound
    /// request is made, and only after provider, credential and image all check out.
    pub async fn dispatch(
        &self,
        provider: &str,
        brief: &str,
        credential: Option<&SecretString>,
        image: Option<&str>,
    ) -> Result<String, GenerationError> {
        let kind: ProviderKind = provider.parse()?;
        let backend = self
            .providers
            .get(&kind)
            .ok_or_else(|| GenerationError::UnsupportedProvider(kind.to_string()))?;

        let api_key = self.credentials.resolve(kind, credential)?;
        let image = image.map(ImagePayload::from_data_uri).transpose()?;

        log::info!(
            "Dispatching generation brief to {} ({} chars, image: {})",
            kind,
            brief.len(),
            image.is_some()
        );

        backend
            .generate(ProviderCall {
                brief: brief.to_string(),
                image,
                api_key,
            })
            .await
            .map_err(|err| classify_provider_error(kind, err))
    }

    /// Strip code fences and parse the provider text. Only the top-level array
    /// shape is checked; items are returned verbatim and in order.
    pub fn normalize(raw: &str, expected: Difficulty) -> GenerationOutcome {
        let cleaned = strip_code_fence(raw);

        let parsed: Value = match serde_json::from_str(cleaned) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Failed to parse generated prompts: {}. Raw response: {}", err, raw);
                return GenerationError::Unparseable(err.to_string()).into();
            }
        };

        match parsed {
            Value::Array(items) => {
                let mismatched = items
                    .iter()
                    .filter(|item| {
                        item.get("difficulty")
                            .and_then(Value::as_str)
                            .is_some_and(|d| !d.eq_ignore_ascii_case(expected.as_str()))
                    })
                    .count();
                if mismatched > 0 {
                    log::warn!(
                        "{} of {} generated items did not echo difficulty '{}'",
                        mismatched,
                        items.len(),
                        expected
                    );
                }
                GenerationOutcome::Success(items)
            }
            other => {
                log::error!("Generated prompts were not a JSON array: {}", other);
                GenerationError::WrongShape.into()
            }
        }
    }

    /// Build, dispatch and normalize. Every failure comes back as an outcome.
    pub async fn generate(&self, request: GenerationRequest) -> GenerationOutcome {
        let brief = self.builder.build(&request);
        let difficulty = request.effective_difficulty();

        match self
            .dispatch(
                &request.provider,
                &brief,
                request.credential.as_ref(),
                request.image.as_deref(),
            )
            .await
        {
            Ok(raw) => Self::normalize(&raw, difficulty),
            Err(err) => {
                log::warn!("Generation failed ({:?}): {}", err.category(), err);
                err.into()
            }
        }
    }

    /// `generate` bounded by a host deadline. Expiry is reported as a timeout.
    pub async fn generate_within(
        &self,
        request: GenerationRequest,
        deadline: Duration,
    ) -> GenerationOutcome {
        match tokio::time::timeout(deadline, self.generate(request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                log::warn!("Generation exceeded the {}s deadline", deadline.as_secs());
                GenerationError::Timeout(format!(
                    "no response within {}s",
                    deadline.as_secs()
                ))
                .into()
            }
        }
    }
}

/// Removes one fence wrapping the whole reply. Fences inside string values are content.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = match OPENING_FENCE.find(trimmed) {
        Some(fence) => &trimmed[fence.end()..],
        None => trimmed,
    };
    body.strip_suffix(CLOSING_FENCE).unwrap_or(body).trim()
}

fn classify_provider_error(kind: ProviderKind, err: ProviderError) -> GenerationError {
    log::error!("{} provider call failed: {}", kind, err);
    if err.is_timeout() {
        GenerationError::Timeout(err.to_string())
    } else {
        GenerationError::Provider(err.message().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::{FailureCategory, PROVIDER_FALLBACK_MESSAGE, TIMEOUT_MESSAGE},
        services::providers::MockGenerationProvider,
    };
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn mock(kind: ProviderKind) -> MockGenerationProvider {
        let mut provider = MockGenerationProvider::new();
        provider.expect_kind().return_const(kind);
        provider
    }

    fn service_with(
        provider: MockGenerationProvider,
        credentials: ProviderCredentials,
    ) -> GenerationService {
        GenerationService::with_providers(
            PromptRequestBuilder::new("Korean"),
            credentials,
            vec![Arc::new(provider)],
        )
    }

    fn gemini_default_key() -> ProviderCredentials {
        ProviderCredentials::default()
            .with_default(ProviderKind::Gemini, SecretString::from("default-key".to_string()))
    }

    #[test]
    fn normalize_accepts_clean_json_array() {
        let items = json!([
            { "title": "t", "content": "c", "expected_answer": "e", "difficulty": "beginner" }
        ]);
        let outcome = GenerationService::normalize(&items.to_string(), Difficulty::Beginner);
        assert_eq!(
            outcome,
            GenerationOutcome::Success(items.as_array().unwrap().clone())
        );
    }

    #[test]
    fn normalize_strips_language_tagged_fences() {
        let outcome = GenerationService::normalize("```json\n[1,2,3]\n```", Difficulty::Beginner);
        assert_eq!(outcome, GenerationOutcome::Success(vec![json!(1), json!(2), json!(3)]));
    }

    #[test]
    fn normalize_strips_bare_fences_and_whitespace() {
        let outcome = GenerationService::normalize("  \n```\n[]\n```  ", Difficulty::Beginner);
        assert_eq!(outcome, GenerationOutcome::Success(vec![]));
    }

    #[test]
    fn normalize_keeps_fences_inside_item_content() {
        let content = "Answer in this format:\n```markdown\n## Summary\n```";
        let items = json!([{
            "title": "t",
            "content": content,
            "expected_answer": "e",
            "difficulty": "advanced"
        }]);
        let raw = format!("```json\n{}\n```", items);

        match GenerationService::normalize(&raw, Difficulty::Advanced) {
            GenerationOutcome::Success(parsed) => assert_eq!(parsed[0]["content"], content),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn normalize_rejects_non_json() {
        match GenerationService::normalize("not json", Difficulty::Beginner) {
            GenerationOutcome::Failure { category, message } => {
                assert_eq!(category, FailureCategory::Unparseable);
                assert!(!message.is_empty());
                assert!(!message.contains("not json"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn normalize_rejects_non_array_json() {
        match GenerationService::normalize("{\"a\":1}", Difficulty::Beginner) {
            GenerationOutcome::Failure { category, message } => {
                assert_eq!(category, FailureCategory::WrongShape);
                assert!(!message.is_empty());
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn normalize_keeps_items_with_other_difficulty() {
        let outcome = GenerationService::normalize(
            "[{\"title\":\"t\",\"difficulty\":\"advanced\"}]",
            Difficulty::Beginner,
        );
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn unsupported_provider_never_reaches_network() {
        let mut provider = mock(ProviderKind::Gemini);
        provider.expect_generate().times(0);
        let service = service_with(provider, gemini_default_key());

        let outcome = service
            .generate(GenerationRequest::new("providerC", "topic"))
            .await;
        assert_eq!(outcome.category(), Some(FailureCategory::Config));
    }

    #[tokio::test]
    async fn known_but_unregistered_provider_is_unsupported() {
        let mut provider = mock(ProviderKind::Gemini);
        provider.expect_generate().times(0);
        let service = service_with(provider, gemini_default_key());

        let err = service.dispatch("openai", "brief", None, None).await.unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedProvider(_)));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_network() {
        let mut provider = mock(ProviderKind::Gemini);
        provider.expect_generate().times(0);
        let service = service_with(provider, ProviderCredentials::default());

        let err = service.dispatch("gemini", "brief", None, None).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential(_)));
        assert_eq!(err.category(), FailureCategory::Config);
    }

    #[tokio::test]
    async fn explicit_credential_overrides_default() {
        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .withf(|call| call.api_key.expose_secret() == "caller-key")
            .times(1)
            .returning(|_| Ok("[]".to_string()));
        let service = service_with(provider, gemini_default_key());

        let caller_key = SecretString::from("caller-key".to_string());
        let raw = service
            .dispatch("gemini", "brief", Some(&caller_key), None)
            .await
            .unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn default_credential_used_when_caller_supplies_none() {
        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .withf(|call| call.api_key.expose_secret() == "default-key" && call.brief == "brief")
            .times(1)
            .returning(|_| Ok("[]".to_string()));
        let service = service_with(provider, gemini_default_key());

        assert!(service.dispatch("gemini", "brief", None, None).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_image_fails_before_network() {
        let mut provider = mock(ProviderKind::Gemini);
        provider.expect_generate().times(0);
        let service = service_with(provider, gemini_default_key());

        let err = service
            .dispatch("gemini", "brief", None, Some("not-a-data-uri"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), FailureCategory::Input);
    }

    #[tokio::test]
    async fn image_is_forwarded_as_payload() {
        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .withf(|call| {
                call.image
                    .as_ref()
                    .is_some_and(|image| image.mime_type == "image/webp" && image.data == "UklGR")
            })
            .times(1)
            .returning(|_| Ok("[]".to_string()));
        let service = service_with(provider, gemini_default_key());

        let result = service
            .dispatch("gemini", "brief", None, Some("data:image/webp;base64,UklGR"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn gateway_timeout_is_classified_as_timeout() {
        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .times(1)
            .returning(|_| Err(ProviderError::Status { status: 504, body: String::new() }));
        let service = service_with(provider, gemini_default_key());

        let outcome = service.generate(GenerationRequest::new("gemini", "topic")).await;
        assert_eq!(
            outcome,
            GenerationOutcome::Failure {
                category: FailureCategory::Timeout,
                message: TIMEOUT_MESSAGE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn provider_error_message_passes_through() {
        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .times(1)
            .returning(|_| Err(ProviderError::Api("Quota exceeded".to_string())));
        let service = service_with(provider, gemini_default_key());

        let outcome = service.generate(GenerationRequest::new("gemini", "topic")).await;
        assert_eq!(
            outcome,
            GenerationOutcome::Failure {
                category: FailureCategory::Provider,
                message: "Quota exceeded".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn silent_provider_error_gets_fallback_message() {
        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .times(1)
            .returning(|_| Err(ProviderError::EmptyResponse));
        let service = service_with(provider, gemini_default_key());

        let outcome = service.generate(GenerationRequest::new("gemini", "topic")).await;
        assert_eq!(
            outcome,
            GenerationOutcome::Failure {
                category: FailureCategory::Provider,
                message: PROVIDER_FALLBACK_MESSAGE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn generate_sends_built_brief() {
        let request = GenerationRequest::new("gemini", "budget report")
            .with_count(2)
            .with_difficulty(Difficulty::Intermediate);
        let expected_brief = PromptRequestBuilder::new("Korean").build(&request);

        let mut provider = mock(ProviderKind::Gemini);
        provider
            .expect_generate()
            .withf(move |call| call.brief == expected_brief)
            .times(1)
            .returning(|_| Ok("```json\n[{\"title\":\"a\"},{\"title\":\"b\"}]\n```".to_string()));
        let service = service_with(provider, gemini_default_key());

        match service.generate(request).await {
            GenerationOutcome::Success(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0]["title"], "a");
                assert_eq!(items[1]["title"], "b");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    struct StalledProvider;

    #[async_trait::async_trait]
    impl GenerationProvider for StalledProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::OpenAi
        }

        async fn generate(&self, _call: ProviderCall) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("[]".to_string())
        }
    }

    #[tokio::test]
    async fn host_deadline_expiry_is_a_timeout() {
        let service = GenerationService::with_providers(
            PromptRequestBuilder::new("Korean"),
            ProviderCredentials::default()
                .with_default(ProviderKind::OpenAi, SecretString::from("k".to_string())),
            vec![Arc::new(StalledProvider)],
        );

        let outcome = service
            .generate_within(
                GenerationRequest::new("openai", "slow topic"),
                Duration::from_millis(20),
            )
            .await;

        assert_eq!(
            outcome,
            GenerationOutcome::Failure {
                category: FailureCategory::Timeout,
                message: TIMEOUT_MESSAGE.to_string(),
            }
        );
    }
}
