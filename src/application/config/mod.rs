//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::policy::{DEFAULT_MAX_PRD_CHARS, DEFAULT_MIN_PRD_CHARS, InputLimits};
use crate::domain::usage::DEFAULT_FREE_TIER_LIMIT;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 생성 API(provider) 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 입력/무료 사용량 제한
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    /// 바인딩 주소(host:port)
    pub bind_addr: Option<String>,
    /// 요청 전체 타임아웃(초)
    pub request_timeout_secs: Option<u64>,
    /// 사용량 쿠키에 Secure 속성을 붙일지 여부(운영 환경 true)
    pub secure_cookies: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// API 베이스 URL
    pub api_base: Option<String>,
    /// 모델 식별자
    pub model: Option<String>,
    /// 최대 출력 토큰
    pub max_tokens: Option<u32>,
    /// 무료 사용량용 서버 키(직접값, 권장하지 않음)
    pub api_key: Option<String>,
    /// 서버 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LimitsConfig {
    /// PRD 최소 길이(trim 후 문자 수)
    pub min_prd_chars: Option<usize>,
    /// PRD 최대 길이(문자 수)
    pub max_prd_chars: Option<usize>,
    /// 개인 키 없이 허용되는 생성 횟수
    pub free_tier_limit: Option<u32>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        self.server
            .bind_addr
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.server
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn secure_cookies(&self) -> bool {
        self.server.secure_cookies.unwrap_or(false)
    }

    pub fn api_base(&self) -> String {
        self.provider
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn model(&self) -> String {
        self.provider
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn max_tokens(&self) -> u32 {
        self.provider.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn input_limits(&self) -> InputLimits {
        InputLimits {
            min_chars: self.limits.min_prd_chars.unwrap_or(DEFAULT_MIN_PRD_CHARS),
            max_chars: self.limits.max_prd_chars.unwrap_or(DEFAULT_MAX_PRD_CHARS),
        }
    }

    pub fn free_tier_limit(&self) -> u32 {
        self.limits
            .free_tier_limit
            .unwrap_or(DEFAULT_FREE_TIER_LIMIT)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.server.merge_from(other.server);
        self.provider.merge_from(other.provider);
        self.limits.merge_from(other.limits);
    }
}

impl ServerConfig {
    pub fn merge_from(&mut self, other: ServerConfig) {
        if other.bind_addr.is_some() {
            self.bind_addr = other.bind_addr;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.secure_cookies.is_some() {
            self.secure_cookies = other.secure_cookies;
        }
    }
}

impl ProviderConfig {
    /// 서버 키 환경변수 이름(미지정 시 ANTHROPIC_API_KEY).
    pub fn api_key_env_name(&self) -> &str {
        self.api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}

impl LimitsConfig {
    pub fn merge_from(&mut self, other: LimitsConfig) {
        if other.min_prd_chars.is_some() {
            self.min_prd_chars = other.min_prd_chars;
        }
        if other.max_prd_chars.is_some() {
            self.max_prd_chars = other.max_prd_chars;
        }
        if other.free_tier_limit.is_some() {
            self.free_tier_limit = other.free_tier_limit;
        }
    }
}
