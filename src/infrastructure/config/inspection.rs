//! 적용 설정 진단(inspection) 뷰 모델. 키 값 자체는 포함하지 않는다.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_server_key;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub effective: EffectiveConfig,
    pub server_key: KeyInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub bind_addr: String,
    pub request_timeout_secs: u64,
    pub secure_cookies: bool,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub min_prd_chars: usize,
    pub max_prd_chars: usize,
    pub free_tier_limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyInspection {
    pub source: Option<String>,
    pub resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let limits = config.input_limits();
        let key = resolve_server_key(&config.provider);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            effective: EffectiveConfig {
                bind_addr: config.bind_addr(),
                request_timeout_secs: config.request_timeout_secs(),
                secure_cookies: config.secure_cookies(),
                api_base: config.api_base(),
                model: config.model(),
                max_tokens: config.max_tokens(),
                min_prd_chars: limits.min_chars,
                max_prd_chars: limits.max_chars,
                free_tier_limit: config.free_tier_limit(),
            },
            server_key: KeyInspection {
                resolved: key.credential.is_some(),
                source: key.source,
            },
        }
    }
}
