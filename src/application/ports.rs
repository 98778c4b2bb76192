//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::completion::{Completion, CompletionRequest};
use crate::domain::error::ProviderError;
use crate::domain::story::GenerationResponse;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 텍스트 생성 provider 포트.
/// 실패는 닫힌 분류(`ProviderErrorKind`)로만 전달한다.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}

/// 요청마다 해석된 키로 provider 클라이언트를 만드는 팩토리 포트.
pub trait CompletionClientFactory: Send + Sync {
    fn build(&self, api_key: &str) -> Box<dyn CompletionClient>;
}

/// 스토리 마크다운 렌더링 포트.
pub trait MarkdownRenderer: Send + Sync {
    fn render_all(&self, response: &GenerationResponse) -> String;
}
