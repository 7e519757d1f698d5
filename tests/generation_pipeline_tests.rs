use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use promptlab_server::{
    constants::{audience_profiles::UNIVERSITY, generation_prompt::ADVANCED_CLAUSE},
    errors::{FailureCategory, TIMEOUT_MESSAGE},
    models::domain::{Difficulty, GenerationOutcome, GenerationRequest},
    services::{
        generation_service::{GenerationService, ProviderCredentials},
        prompt_builder::PromptRequestBuilder,
        providers::{GenerationProvider, ProviderCall, ProviderError, ProviderKind},
    },
};

/// Provider double that records every call and replays a fixed reply.
struct StubProvider {
    kind: ProviderKind,
    reply: Result<String, ProviderError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubProvider {
    fn new(kind: ProviderKind, reply: Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(&self, call: ProviderCall) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((call.brief, call.api_key.expose_secret().to_string()));
        self.reply.clone()
    }
}

fn service(provider: Arc<StubProvider>) -> GenerationService {
    let provider: Arc<dyn GenerationProvider> = provider;
    GenerationService::with_providers(
        PromptRequestBuilder::new("Korean"),
        ProviderCredentials::default(),
        vec![provider],
    )
}

#[actix_rt::test]
async fn test_university_advanced_request_end_to_end() {
    let provider = StubProvider::new(
        ProviderKind::Gemini,
        Ok("```json\n[{\"title\":\"t1\",\"content\":\"c1\",\"expected_answer\":\"e1\",\"difficulty\":\"advanced\"},{\"title\":\"t2\",\"content\":\"c2\",\"expected_answer\":\"e2\",\"difficulty\":\"advanced\"}]\n```".to_string()),
    );
    let service = service(provider.clone());

    let request = GenerationRequest::new("gemini", "신입 사원 온보딩")
        .with_count(2)
        .with_difficulty(Difficulty::Advanced)
        .with_audience_group("univ")
        .with_credential("caller-key");

    let outcome = service.generate(request).await;

    let items = match outcome {
        GenerationOutcome::Success(items) => items,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "t1");
    assert_eq!(items[1]["title"], "t2");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    let (brief, key) = &calls[0];
    assert_eq!(key, "caller-key");
    assert!(brief.contains(UNIVERSITY.role));
    assert!(brief.contains("exactly 2"));
    assert!(brief.contains(ADVANCED_CLAUSE));
    assert!(brief.contains("Topic: \"신입 사원 온보딩\""));
    assert!(brief.contains("Korean"));
}

#[actix_rt::test]
async fn test_gateway_timeout_reports_timeout_message() {
    let provider = StubProvider::new(
        ProviderKind::OpenAi,
        Err(ProviderError::Status {
            status: 504,
            body: "upstream timed out".to_string(),
        }),
    );
    let service = service(provider.clone());

    let request = GenerationRequest::new("openai", "quarterly report")
        .with_count(10)
        .with_credential("k");

    assert_eq!(
        service.generate(request).await,
        GenerationOutcome::Failure {
            category: FailureCategory::Timeout,
            message: TIMEOUT_MESSAGE.to_string(),
        }
    );
    assert_eq!(provider.calls().len(), 1);
}

#[actix_rt::test]
async fn test_missing_credential_makes_no_call() {
    let provider = StubProvider::new(ProviderKind::Gemini, Ok("[]".to_string()));
    let service = service(provider.clone());

    let outcome = service
        .generate(GenerationRequest::new("gemini", "topic"))
        .await;

    assert_eq!(outcome.category(), Some(FailureCategory::Config));
    assert!(provider.calls().is_empty());
}

#[actix_rt::test]
async fn test_configured_default_key_is_used() {
    let provider = StubProvider::new(ProviderKind::Gemini, Ok("[]".to_string()));
    let service = GenerationService::with_providers(
        PromptRequestBuilder::new("English"),
        ProviderCredentials::default()
            .with_default(ProviderKind::Gemini, SecretString::from("server-key".to_string())),
        vec![provider.clone() as Arc<dyn GenerationProvider>],
    );

    let outcome = service
        .generate(GenerationRequest::new("gemini", "topic"))
        .await;

    assert_eq!(outcome, GenerationOutcome::Success(vec![]));
    assert_eq!(provider.calls()[0].1, "server-key");
}

#[actix_rt::test]
async fn test_object_reply_is_wrong_shape() {
    let provider = StubProvider::new(
        ProviderKind::Gemini,
        Ok(r#"{"items":[{"title":"t"}]}"#.to_string()),
    );
    let service = service(provider);

    let outcome = service
        .generate(GenerationRequest::new("gemini", "topic").with_credential("k"))
        .await;

    assert_eq!(outcome.category(), Some(FailureCategory::WrongShape));
}

#[test]
fn test_brief_is_deterministic() {
    let builder = PromptRequestBuilder::new("Korean");
    let request = GenerationRequest::new("gemini", "public notice")
        .with_audience_group("public")
        .with_difficulty(Difficulty::Intermediate);

    assert_eq!(builder.build(&request), builder.build(&request));
}
