//! PRD → 사용자 스토리 생성의 전체 오케스트레이션 유스케이스.
//!
//! 입력 검증 → 무료 사용량 확인 → 생성(파싱 실패 시 1회 재시도)
//! → 구조 검증 → 사용량 반영 순서로 진행한다. 어느 단계든 실패하면 즉시 종료한다.

mod admission;
mod attempts;

use std::time::Instant;

use tracing::{info, warn};

use crate::application::config::DEFAULT_MAX_TOKENS;
use crate::application::ports::CompletionClientFactory;
use crate::domain::error::GenerationError;
use crate::domain::policy::{InputLimits, RetryPolicy};
use crate::domain::prompt::{build_system_prompt, build_user_prompt};
use crate::domain::story::{GenerationConfig, GenerationResponse};
use crate::domain::usage::{DEFAULT_FREE_TIER_LIMIT, UsageCounter};
use crate::domain::validate::validate_generation;

use admission::admit;
use attempts::generate_with_retry;

/// 프로세스 전역(읽기 전용) 생성 설정.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// 무료 사용량에 쓰이는 서버 키
    pub server_key: Option<String>,
    pub limits: InputLimits,
    pub free_tier_limit: u32,
    pub retry: RetryPolicy,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            server_key: None,
            limits: InputLimits::default(),
            free_tier_limit: DEFAULT_FREE_TIER_LIMIT,
            retry: RetryPolicy::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// 한 번의 생성 요청.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prd: String,
    pub config: GenerationConfig,
    /// 사용자가 직접 제공한 키. 있으면 무료 사용량 제한을 건너뛴다.
    pub api_key: Option<String>,
    /// 클라이언트가 제시한 무료 사용량
    pub usage: UsageCounter,
}

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub response: GenerationResponse,
    /// 서버 키로 생성한 경우 클라이언트가 저장할 갱신된 사용량.
    pub usage: Option<UsageCounter>,
}

pub struct GenerateStoriesUseCase<'a> {
    pub client_factory: &'a dyn CompletionClientFactory,
    pub settings: &'a GenerationSettings,
}

impl<'a> GenerateStoriesUseCase<'a> {
    pub async fn execute(&self, request: GenerateRequest) -> Result<GenerateOutcome, GenerationError> {
        let started = Instant::now();
        let admission = admit(self, &request)?;

        let system_prompt = build_system_prompt(&request.config);
        let user_prompt = build_user_prompt(&request.prd);
        let client = self.client_factory.build(&admission.api_key);

        let value = generate_with_retry(self, client.as_ref(), &system_prompt, &user_prompt).await?;
        let response = validate_generation(value).inspect_err(|_| {
            warn!("completion parsed but contained no usable stories");
        })?;

        let usage = admission
            .free_tier
            .then(|| request.usage.incremented());

        info!(
            stories = response.stories.len(),
            free_tier = admission.free_tier,
            usage = usage.map(UsageCounter::count),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation succeeded"
        );

        Ok(GenerateOutcome { response, usage })
    }
}

#[cfg(test)]
mod tests;
