//! 생성 파이프라인 오류 분류.
//!
//! 내부 상세(`detail`, `Internal`)는 로그 전용이며 사용자에게는
//! `public_message()`의 고정 문구만 노출한다.

use thiserror::Error;

/// Provider 호출 실패의 닫힌 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    InvalidCredentials,
    InsufficientCredit,
    RateLimited,
    Overloaded,
    Unknown,
}

impl ProviderErrorKind {
    /// HTTP 상태 코드와 오류 메시지로 분류한다.
    /// 상태 코드가 있으면 코드가 우선하고, 없을 때(전송 계층/SDK 메시지)만
    /// 문자열 단서로 판별한다. 검사 순서: 인증 → 잔액 → rate limit → 과부하.
    pub fn classify(status: Option<u16>, message: &str) -> Self {
        let lower = message.to_lowercase();
        let has = |needle: &str| lower.contains(needle);

        match status {
            Some(401 | 403) => return Self::InvalidCredentials,
            Some(429) => return Self::RateLimited,
            Some(529) => return Self::Overloaded,
            Some(_) => {
                if has("credit balance") || has("billing") {
                    return Self::InsufficientCredit;
                }
                if has("overloaded") {
                    return Self::Overloaded;
                }
                return Self::Unknown;
            }
            None => {}
        }

        if has("401") || has("authentication") || has("invalid x-api-key") {
            Self::InvalidCredentials
        } else if has("credit balance") || has("billing") {
            Self::InsufficientCredit
        } else if has("429") || has("rate") {
            Self::RateLimited
        } else if has("overloaded") || has("529") {
            Self::Overloaded
        } else {
            Self::Unknown
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InsufficientCredit => "insufficient_credit",
            Self::RateLimited => "provider_rate_limited",
            Self::Overloaded => "provider_overloaded",
            Self::Unknown => "unknown",
        }
    }
}

/// `CompletionClient` 포트가 반환하는 오류.
#[derive(Debug, Clone, Error)]
#[error("{}: {detail}", .kind.code())]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub detail: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// 메시지만으로 분류한 오류를 만든다(전송 계층 실패 등).
    pub fn from_message(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            kind: ProviderErrorKind::classify(None, &detail),
            detail,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key available")]
    NoKeyAvailable,
    #[error("PRD shorter than {min} characters")]
    TooShort { min: usize },
    #[error("PRD longer than {max} characters")]
    TooLong { max: usize },
    #[error("input does not look like product requirements")]
    LowQuality,
    #[error("free tier exhausted ({used}/{limit})")]
    RateLimited { used: u32, limit: u32 },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("completion is not parseable JSON after retry")]
    Unparseable,
    #[error("completion contained no usable stories")]
    NoStories,
    #[error("unexpected completion shape: {0}")]
    UnexpectedShape(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GenerationError {
    /// 응답 상태 코드.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoKeyAvailable | Self::TooShort { .. } | Self::TooLong { .. } | Self::LowQuality => {
                400
            }
            Self::RateLimited { .. } => 429,
            Self::Provider(err) => match err.kind {
                ProviderErrorKind::InvalidCredentials => 401,
                ProviderErrorKind::InsufficientCredit => 402,
                ProviderErrorKind::RateLimited => 429,
                ProviderErrorKind::Overloaded => 503,
                ProviderErrorKind::Unknown => 500,
            },
            Self::Unparseable | Self::NoStories => 422,
            Self::UnexpectedShape(_) | Self::Internal(_) => 500,
        }
    }

    /// 사용자에게 노출하는 고정 문구.
    pub fn public_message(&self) -> String {
        match self {
            Self::NoKeyAvailable => {
                "No API key available. Please add your Anthropic key in Settings.".to_string()
            }
            Self::TooShort { min } => {
                format!("Please provide at least {min} characters of product requirements.")
            }
            Self::TooLong { max } => {
                format!("Text too long. Please keep it under {max} characters.")
            }
            Self::LowQuality => "Your input doesn't look like product requirements. Try pasting a PRD, feature description, or meeting notes with enough context.".to_string(),
            Self::RateLimited { .. } => "Free tries used up. Add your own API key in Settings to continue — it's free to create.".to_string(),
            Self::Provider(err) => match err.kind {
                ProviderErrorKind::InvalidCredentials => {
                    "Invalid API key. Check your key and try again.".to_string()
                }
                ProviderErrorKind::InsufficientCredit => "API credit balance is too low. Please add credits at console.anthropic.com/settings/billing".to_string(),
                ProviderErrorKind::RateLimited => {
                    "Rate limit hit. Wait a moment and try again.".to_string()
                }
                ProviderErrorKind::Overloaded => {
                    "AI service is busy. Please try again in a few seconds.".to_string()
                }
                ProviderErrorKind::Unknown => GENERIC_FAILURE.to_string(),
            },
            Self::Unparseable => "Couldn't generate stories from this input. Try adding more detail about the feature.".to_string(),
            Self::NoStories => {
                "No stories generated. Add more detail about the feature or product.".to_string()
            }
            Self::UnexpectedShape(_) => "Unexpected response. Please try again.".to_string(),
            Self::Internal(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// 무료 사용량 소진 시에만 true. 클라이언트가 개인 키 입력을 유도한다.
    pub fn needs_key(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// 분류되지 않은 실패에 대한 공통 문구.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
