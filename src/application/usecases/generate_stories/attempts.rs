//! 생성 호출과 JSON 파싱 재시도 단계.

use std::time::Instant;

use serde_json::Value;
use tracing::{info, warn};

use crate::application::ports::CompletionClient;
use crate::application::usecases::generate_stories::GenerateStoriesUseCase;
use crate::domain::completion::{ChatMessage, CompletionContent, CompletionRequest};
use crate::domain::error::GenerationError;
use crate::domain::extract::try_parse_stories;
use crate::domain::policy::AttemptOutcome;
use crate::domain::prompt::JSON_RETRY_INSTRUCTION;

/// 파싱 가능한 JSON이 나올 때까지 재시도 예산 안에서 생성을 반복한다.
/// 재시도 시 직전 실패 응답과 교정 지시문을 대화 이력에 덧붙인다.
pub(super) async fn generate_with_retry(
    use_case: &GenerateStoriesUseCase<'_>,
    client: &dyn CompletionClient,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<Value, GenerationError> {
    let policy = use_case.settings.retry;
    let mut messages = vec![ChatMessage::user(user_prompt)];
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let request = CompletionRequest {
            system: system_prompt.to_string(),
            messages: messages.clone(),
            max_tokens: use_case.settings.max_tokens,
        };

        let started = Instant::now();
        let completion = match client.complete(&request).await {
            Ok(completion) => completion,
            Err(err) => {
                warn!(
                    provider = client.name(),
                    attempt = attempts,
                    kind = err.kind.code(),
                    detail = %err.detail,
                    "provider call failed"
                );
                if !policy.should_retry(attempts, AttemptOutcome::ProviderFailed) {
                    return Err(err.into());
                }
                continue;
            }
        };
        info!(
            provider = client.name(),
            attempt = attempts,
            elapsed_ms = started.elapsed().as_millis() as u64,
            total_tokens = completion.usage.total_tokens(),
            "completion received"
        );

        let text = match completion.content {
            CompletionContent::Text(text) => text,
            CompletionContent::Other { block_type } if attempts == 1 => {
                warn!(block_type = %block_type, "first content block is not text");
                return Err(GenerationError::UnexpectedShape(block_type));
            }
            CompletionContent::Other { .. } => String::new(),
        };

        if let Some(value) = try_parse_stories(&text) {
            return Ok(value);
        }

        if !policy.should_retry(attempts, AttemptOutcome::ParseFailed) {
            warn!(attempts, "completion still not valid JSON; giving up");
            return Err(GenerationError::Unparseable);
        }

        warn!(
            attempt = attempts,
            preview = %preview(&text),
            "completion is not valid JSON; retrying with corrective instruction"
        );
        if !text.trim().is_empty() {
            messages.push(ChatMessage::assistant(text));
        }
        messages.push(ChatMessage::user(JSON_RETRY_INSTRUCTION));
    }
}

fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}
