//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;
use tracing::{info, warn};

use crate::application::config::Config;
use crate::application::ports::{CompletionClientFactory, ConfigRepository};
use crate::application::usecases::export_markdown::ExportMarkdownUseCase;
use crate::application::usecases::generate_stories::{GenerateStoriesUseCase, GenerationSettings};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::domain::policy::RetryPolicy;
use crate::infrastructure::adapters::{
    AnthropicClientFactory, JsonConfigRepository, MarkdownRendererAdapter,
};
use crate::infrastructure::config::resolve_server_key;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
/// 생성 이후에는 읽기 전용이므로 HTTP 핸들러 간에 `Arc`로 공유한다.
pub struct AppComposition {
    config: Config,
    config_repo: JsonConfigRepository,
    client_factory: Box<dyn CompletionClientFactory>,
    renderer: MarkdownRendererAdapter,
    settings: GenerationSettings,
}

impl AppComposition {
    /// 설정 파일을 병합 로딩하고 실제 Anthropic 클라이언트로 조립한다.
    pub fn load() -> Result<Self> {
        let config = JsonConfigRepository.load()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let factory = AnthropicClientFactory::from_config(&config)?;
        let resolved = resolve_server_key(&config.provider);
        match &resolved.credential {
            Some(_) => info!(source = resolved.source.as_deref(), "server key resolved"),
            None => warn!(
                source = resolved.source.as_deref(),
                "no server key; only requests carrying their own key will succeed"
            ),
        }
        Ok(Self::with_client_factory(
            config,
            Box::new(factory),
            resolved.credential,
        ))
    }

    /// provider 클라이언트 팩토리를 주입해 조립한다(테스트/대체 provider용).
    pub fn with_client_factory(
        config: Config,
        client_factory: Box<dyn CompletionClientFactory>,
        server_key: Option<String>,
    ) -> Self {
        let settings = GenerationSettings {
            server_key,
            limits: config.input_limits(),
            free_tier_limit: config.free_tier_limit(),
            retry: RetryPolicy::default(),
            max_tokens: config.max_tokens(),
        };
        Self {
            config,
            config_repo: JsonConfigRepository,
            client_factory,
            renderer: MarkdownRendererAdapter,
            settings,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// 스토리 생성 유스케이스를 생성한다.
    pub fn generate_usecase(&self) -> GenerateStoriesUseCase<'_> {
        GenerateStoriesUseCase {
            client_factory: self.client_factory.as_ref(),
            settings: &self.settings,
        }
    }

    /// 마크다운 내보내기 유스케이스를 생성한다.
    pub fn export_markdown_usecase(&self) -> ExportMarkdownUseCase<'_> {
        ExportMarkdownUseCase {
            renderer: &self.renderer,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}
