use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::*;
use crate::application::ports::CompletionClient;
use crate::domain::completion::{
    ChatRole, Completion, CompletionContent, CompletionRequest, TokenUsage,
};
use crate::domain::error::{ProviderError, ProviderErrorKind};
use crate::domain::prompt::JSON_RETRY_INSTRUCTION;

const PRD: &str = "Users should be able to search and filter their project dashboard by team, and export a report.";

type Script = Arc<Mutex<ScriptState>>;

#[derive(Default)]
struct ScriptState {
    replies: VecDeque<Result<Completion, ProviderError>>,
    requests: Vec<CompletionRequest>,
    keys: Vec<String>,
}

struct ScriptedFactory(Script);

struct ScriptedClient(Script);

impl CompletionClientFactory for ScriptedFactory {
    fn build(&self, api_key: &str) -> Box<dyn CompletionClient> {
        self.0.lock().unwrap().keys.push(api_key.to_string());
        Box::new(ScriptedClient(self.0.clone()))
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let mut state = self.0.lock().unwrap();
        state.requests.push(request.clone());
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::from_message("script exhausted")))
    }
}

fn script(replies: Vec<Result<Completion, ProviderError>>) -> Script {
    Arc::new(Mutex::new(ScriptState {
        replies: replies.into(),
        ..ScriptState::default()
    }))
}

fn stories_json(count: usize) -> String {
    let stories: Vec<String> = (1..=count)
        .map(|i| {
            format!(
                r#"{{"id":"US-{i:03}","title":"Story {i}","description":"As a user...","acceptanceCriteria":{{"functional":["f"],"accessibility":[],"performance":[],"errorHandling":[]}},"storyPoints":2,"epic":"Search","flags":[],"techNotes":""}}"#
            )
        })
        .collect();
    format!(
        r#"{{"stories":[{}],"summary":{{"totalStories":{count},"totalPoints":{},"epics":["Search"]}}}}"#,
        stories.join(","),
        count * 2
    )
}

fn settings(server_key: Option<&str>) -> GenerationSettings {
    GenerationSettings {
        server_key: server_key.map(str::to_string),
        ..GenerationSettings::default()
    }
}

fn request(prd: &str, api_key: Option<&str>, usage: u32) -> GenerateRequest {
    GenerateRequest {
        prd: prd.to_string(),
        config: GenerationConfig::default(),
        api_key: api_key.map(str::to_string),
        usage: UsageCounter::new(usage),
    }
}

async fn run(
    script: &Script,
    settings: &GenerationSettings,
    request: GenerateRequest,
) -> Result<GenerateOutcome, GenerationError> {
    let factory = ScriptedFactory(script.clone());
    let use_case = GenerateStoriesUseCase {
        client_factory: &factory,
        settings,
    };
    use_case.execute(request).await
}

#[tokio::test]
async fn clean_completion_succeeds_and_counts_free_tier_usage() {
    let script = script(vec![Ok(Completion::text(stories_json(3)))]);
    let outcome = run(&script, &settings(Some("server-key")), request(PRD, None, 1))
        .await
        .unwrap();

    assert_eq!(outcome.response.summary.total_stories, 3);
    assert_eq!(outcome.response.stories.len(), 3);
    assert_eq!(outcome.usage, Some(UsageCounter::new(2)));

    let state = script.lock().unwrap();
    assert_eq!(state.keys, vec!["server-key".to_string()]);
    assert_eq!(state.requests.len(), 1);
    assert_eq!(state.requests[0].max_tokens, 4096);
    assert!(state.requests[0].system.contains("INVEST FRAMEWORK"));
}

#[tokio::test]
async fn user_key_bypasses_counter_and_is_preferred() {
    let script = script(vec![Ok(Completion::text(stories_json(1)))]);
    let outcome = run(
        &script,
        &settings(Some("server-key")),
        request(PRD, Some("sk-ant-user"), 10),
    )
    .await
    .unwrap();

    assert_eq!(outcome.usage, None);
    assert_eq!(script.lock().unwrap().keys, vec!["sk-ant-user".to_string()]);
}

#[tokio::test]
async fn blank_user_key_falls_back_to_server_key() {
    let script = script(vec![Ok(Completion::text(stories_json(1)))]);
    let outcome = run(&script, &settings(Some("server-key")), request(PRD, Some("  "), 0))
        .await
        .unwrap();
    assert_eq!(outcome.usage, Some(UsageCounter::new(1)));
}

#[tokio::test]
async fn missing_key_is_rejected_first() {
    let script = script(vec![]);
    let err = run(&script, &settings(None), request("short", None, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::NoKeyAvailable));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn input_errors_make_no_external_call() {
    let script = script(vec![]);
    let settings = settings(Some("server-key"));

    let short = run(&script, &settings, request("short", None, 0)).await.unwrap_err();
    assert!(matches!(short, GenerationError::TooShort { min: 50 }));

    let padded = format!("   {}   ", "x".repeat(40));
    let padded_err = run(&script, &settings, request(&padded, None, 0)).await.unwrap_err();
    assert!(matches!(padded_err, GenerationError::TooShort { .. }));

    let long = "user ".repeat(3001);
    let long_err = run(&script, &settings, request(&long, None, 0)).await.unwrap_err();
    assert!(matches!(long_err, GenerationError::TooLong { max: 15_000 }));

    let gibberish = "qwxz plmk vbnr trew yuio hjkl zxcv asdf qwer tyui ghjk bnmv lkjh";
    let low = run(&script, &settings, request(gibberish, None, 0)).await.unwrap_err();
    assert!(matches!(low, GenerationError::LowQuality));

    assert!(script.lock().unwrap().requests.is_empty());
}

#[tokio::test]
async fn exhausted_free_tier_needs_key_without_calling_provider() {
    let script = script(vec![]);
    let err = run(&script, &settings(Some("server-key")), request(PRD, None, 3))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::RateLimited { used: 3, limit: 3 }));
    assert_eq!(err.status_code(), 429);
    assert!(err.needs_key());
    let state = script.lock().unwrap();
    assert!(state.keys.is_empty());
    assert!(state.requests.is_empty());
}

#[tokio::test]
async fn retry_replays_failed_completion_with_corrective_instruction() {
    let prose = "Sure! Here are some thoughts about your PRD.";
    let script = script(vec![
        Ok(Completion::text(prose)),
        Ok(Completion::text(format!("```json\n{}\n```", stories_json(2)))),
    ]);
    let outcome = run(&script, &settings(Some("server-key")), request(PRD, None, 0))
        .await
        .unwrap();
    assert_eq!(outcome.response.stories.len(), 2);

    let state = script.lock().unwrap();
    assert_eq!(state.requests.len(), 2);
    let retry = &state.requests[1].messages;
    assert_eq!(retry.len(), 3);
    assert_eq!(retry[0].role, ChatRole::User);
    assert_eq!(retry[1].role, ChatRole::Assistant);
    assert_eq!(retry[1].content, prose);
    assert_eq!(retry[2].content, JSON_RETRY_INSTRUCTION);
    assert_eq!(state.requests[0].system, state.requests[1].system);
}

#[tokio::test]
async fn second_parse_failure_is_unparseable_and_stops() {
    let script = script(vec![
        Ok(Completion::text("Here is { not json")),
        Ok(Completion::text("Still { not json }")),
        Ok(Completion::text(stories_json(1))),
    ]);
    let err = run(&script, &settings(Some("server-key")), request(PRD, None, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Unparseable));
    assert_eq!(err.status_code(), 422);
    assert_eq!(script.lock().unwrap().requests.len(), 2);
}

#[tokio::test]
async fn provider_errors_are_not_retried() {
    let script = script(vec![
        Err(ProviderError::from_message("529 overloaded_error")),
        Ok(Completion::text(stories_json(1))),
    ]);
    let err = run(&script, &settings(Some("server-key")), request(PRD, None, 0))
        .await
        .unwrap_err();

    match &err {
        GenerationError::Provider(inner) => assert_eq!(inner.kind, ProviderErrorKind::Overloaded),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_code(), 503);
    assert_eq!(script.lock().unwrap().requests.len(), 1);
}

#[tokio::test]
async fn non_text_first_block_is_unexpected_shape() {
    let script = script(vec![Ok(Completion {
        content: CompletionContent::Other {
            block_type: "tool_use".to_string(),
        },
        usage: TokenUsage::default(),
    })]);
    let err = run(&script, &settings(Some("server-key")), request(PRD, None, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::UnexpectedShape(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn empty_story_list_is_rejected_without_counting_usage() {
    let script = script(vec![Ok(Completion::text(
        r#"{"stories":[],"summary":{"totalStories":0,"totalPoints":0,"epics":[]}}"#,
    ))]);
    let err = run(&script, &settings(Some("server-key")), request(PRD, None, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::NoStories));
    assert_eq!(err.status_code(), 422);
}

#[tokio::test]
async fn larger_retry_budget_still_skips_provider_errors() {
    let script = script(vec![
        Err(ProviderError::new(ProviderErrorKind::InvalidCredentials, "401")),
        Ok(Completion::text(stories_json(1))),
    ]);
    let settings = GenerationSettings {
        retry: RetryPolicy { max_attempts: 5 },
        ..settings(Some("server-key"))
    };
    let err = run(&script, &settings, request(PRD, None, 0)).await.unwrap_err();

    assert_eq!(err.status_code(), 401);
    assert_eq!(script.lock().unwrap().requests.len(), 1);
}
