//! Anthropic Messages API 클라이언트 어댑터.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use url::Url;

use crate::application::config::Config;
use crate::application::ports::CompletionClient;
use crate::domain::completion::{Completion, CompletionContent, CompletionRequest, TokenUsage};
use crate::domain::error::ProviderError;

use super::api_runner::send_json;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// 요청과 무관하게 고정되는 API 설정.
#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub endpoint: Url,
    pub model: String,
}

impl AnthropicSettings {
    /// `api_base` 뒤에 `/messages`를 붙인 엔드포인트를 검증해 만든다.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base = config.api_base();
        let endpoint = Url::parse(&format!("{}/messages", base.trim_end_matches('/')))
            .with_context(|| format!("invalid provider.api_base: {base}"))?;
        Ok(Self {
            endpoint,
            model: config.model(),
        })
    }
}

pub struct AnthropicClient {
    client: Client,
    settings: AnthropicSettings,
    credential: String,
}

impl AnthropicClient {
    pub fn new(client: Client, settings: AnthropicSettings, credential: String) -> Self {
        Self {
            client,
            settings,
            credential,
        }
    }

    /// 키 형식과 관계없이 `x-api-key` 헤더로 보낸다.
    fn request_builder(&self, request: &CompletionRequest) -> RequestBuilder {
        self.client
            .post(self.settings.endpoint.clone())
            .header("x-api-key", &self.credential)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&build_payload(&self.settings.model, request))
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    fn name(&self) -> &'static str {
        "Claude"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let builder = self.request_builder(request);
        let response = send_json(self.name(), "request Anthropic API", builder).await?;
        Ok(parse_completion(&response))
    }
}

fn build_payload(model: &str, request: &CompletionRequest) -> Value {
    let messages: Vec<Value> = request
        .messages
        .iter()
        .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
        .collect();

    json!({
        "model": model,
        "max_tokens": request.max_tokens,
        "system": request.system,
        "messages": messages,
    })
}

/// 첫 번째 콘텐츠 블록만 사용한다. 블록이 없으면 `none` 타입으로 취급한다.
fn parse_completion(response: &Value) -> Completion {
    let first = response.pointer("/content/0");
    let block_type = first
        .and_then(|block| block.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("none");

    let content = match (block_type, first.and_then(|b| b.get("text")).and_then(Value::as_str)) {
        ("text", Some(text)) => CompletionContent::Text(text.to_string()),
        _ => CompletionContent::Other {
            block_type: block_type.to_string(),
        },
    };

    Completion {
        content,
        usage: TokenUsage {
            prompt_tokens: response
                .pointer("/usage/input_tokens")
                .and_then(Value::as_u64),
            completion_tokens: response
                .pointer("/usage/output_tokens")
                .and_then(Value::as_u64),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::completion::ChatMessage;

    #[test]
    fn payload_carries_system_history_and_limits() {
        let request = CompletionRequest {
            system: "sys".to_string(),
            messages: vec![
                ChatMessage::user("prd"),
                ChatMessage::assistant("oops"),
                ChatMessage::user("fix it"),
            ],
            max_tokens: 4096,
        };
        let payload = build_payload("claude-3-5-haiku-latest", &request);

        assert_eq!(payload["model"], "claude-3-5-haiku-latest");
        assert_eq!(payload["max_tokens"], 4096);
        assert_eq!(payload["system"], "sys");
        assert_eq!(payload["messages"][1]["role"], "assistant");
        assert_eq!(payload["messages"][2]["content"], "fix it");
    }

    #[test]
    fn parses_text_block_and_usage() {
        let response = json!({
            "content": [{ "type": "text", "text": "{\"stories\":[]}" }],
            "usage": { "input_tokens": 1200, "output_tokens": 800 }
        });
        let completion = parse_completion(&response);
        assert_eq!(
            completion.content,
            CompletionContent::Text("{\"stories\":[]}".to_string())
        );
        assert_eq!(completion.usage.total_tokens(), Some(2000));
    }

    #[test]
    fn non_text_or_missing_blocks_keep_their_type() {
        let tool = parse_completion(&json!({ "content": [{ "type": "tool_use", "id": "x" }] }));
        assert_eq!(
            tool.content,
            CompletionContent::Other {
                block_type: "tool_use".to_string()
            }
        );

        let empty = parse_completion(&json!({ "content": [] }));
        assert_eq!(
            empty.content,
            CompletionContent::Other {
                block_type: "none".to_string()
            }
        );
    }

    #[test]
    fn every_key_format_goes_in_x_api_key_header() {
        let settings = AnthropicSettings::from_config(&Config::default()).unwrap();
        let request = CompletionRequest {
            system: "sys".to_string(),
            messages: vec![ChatMessage::user("prd")],
            max_tokens: 16,
        };

        for key in ["sk-ant-api03-abc", "proxy-issued-key"] {
            let client = AnthropicClient::new(Client::new(), settings.clone(), key.to_string());
            let built = client.request_builder(&request).build().unwrap();
            let headers = built.headers();

            assert_eq!(headers["x-api-key"], key);
            assert_eq!(headers["anthropic-version"], "2023-06-01");
            assert!(headers.get("authorization").is_none());
            assert_eq!(built.url().as_str(), "https://api.anthropic.com/v1/messages");
        }
    }

    #[test]
    fn endpoint_appends_messages_path() {
        let mut config = Config::default();
        config.provider.api_base = Some("http://localhost:8080/v1/".to_string());
        let settings = AnthropicSettings::from_config(&config).unwrap();
        assert_eq!(settings.endpoint.as_str(), "http://localhost:8080/v1/messages");

        config.provider.api_base = Some("not a url".to_string());
        assert!(AnthropicSettings::from_config(&config).is_err());
    }
}
