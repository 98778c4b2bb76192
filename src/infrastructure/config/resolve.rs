//! 설정 값(api key/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::ProviderConfig;

/// 서버 키 해석 결과.
#[derive(Debug, Clone)]
pub struct CredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// 무료 사용량에 쓰이는 서버 키를 해석한다(`api_key` 우선, 없으면 환경변수).
pub fn resolve_server_key(cfg: &ProviderConfig) -> CredentialResolution {
    if let Some(key) = cfg.api_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return CredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env_name();
    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => CredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => CredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_key_wins() {
        let cfg = ProviderConfig {
            api_key: Some("  sk-ant-inline  ".to_string()),
            api_key_env: Some("STORYPILOT_TEST_UNSET_KEY".to_string()),
            ..ProviderConfig::default()
        };
        let resolved = resolve_server_key(&cfg);
        assert_eq!(resolved.credential.as_deref(), Some("sk-ant-inline"));
        assert_eq!(resolved.source.as_deref(), Some("inline"));
    }

    #[test]
    fn missing_env_is_reported() {
        let cfg = ProviderConfig {
            api_key_env: Some("STORYPILOT_TEST_UNSET_KEY_7F3A".to_string()),
            ..ProviderConfig::default()
        };
        let resolved = resolve_server_key(&cfg);
        assert!(resolved.credential.is_none());
        assert_eq!(
            resolved.source.as_deref(),
            Some("env:STORYPILOT_TEST_UNSET_KEY_7F3A (missing)")
        );
    }
}
