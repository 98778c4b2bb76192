//! Completion 클라이언트 팩토리 포트 구현 어댑터.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use crate::application::config::Config;
use crate::application::ports::{CompletionClient, CompletionClientFactory};
use crate::infrastructure::providers::{AnthropicClient, AnthropicSettings, build_api_client};

/// 연결 풀(`reqwest::Client`)은 공유하고 키만 요청마다 바꿔 끼운다.
pub struct AnthropicClientFactory {
    client: Client,
    settings: AnthropicSettings,
}

impl AnthropicClientFactory {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_api_client(Duration::from_secs(config.request_timeout_secs())),
            settings: AnthropicSettings::from_config(config)?,
        })
    }
}

impl CompletionClientFactory for AnthropicClientFactory {
    fn build(&self, api_key: &str) -> Box<dyn CompletionClient> {
        Box::new(AnthropicClient::new(
            self.client.clone(),
            self.settings.clone(),
            api_key.to_string(),
        ))
    }
}
