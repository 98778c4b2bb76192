//! 키 해석, 입력 검증, 무료 사용량 확인 단계(외부 호출 전 거부).

use tracing::{debug, info};

use crate::application::usecases::generate_stories::{GenerateRequest, GenerateStoriesUseCase};
use crate::domain::error::GenerationError;
use crate::domain::quality::has_min_quality;

/// 생성 허가 결과.
pub(super) struct Admission {
    pub api_key: String,
    /// 서버 키 사용 여부(사용량 집계 대상)
    pub free_tier: bool,
}

pub(super) fn admit(
    use_case: &GenerateStoriesUseCase<'_>,
    request: &GenerateRequest,
) -> Result<Admission, GenerationError> {
    let settings = use_case.settings;

    let user_key = request
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());
    let (api_key, free_tier) = match (user_key, settings.server_key.as_deref()) {
        (Some(key), _) => (key.to_string(), false),
        (None, Some(key)) if !key.trim().is_empty() => (key.to_string(), true),
        _ => return Err(GenerationError::NoKeyAvailable),
    };

    let limits = settings.limits;
    if request.prd.trim().chars().count() < limits.min_chars {
        return Err(GenerationError::TooShort {
            min: limits.min_chars,
        });
    }
    if request.prd.chars().count() > limits.max_chars {
        return Err(GenerationError::TooLong {
            max: limits.max_chars,
        });
    }

    if !has_min_quality(&request.prd) {
        return Err(GenerationError::LowQuality);
    }

    if free_tier && request.usage.is_exhausted(settings.free_tier_limit) {
        info!(
            used = request.usage.count(),
            limit = settings.free_tier_limit,
            "free tier exhausted"
        );
        return Err(GenerationError::RateLimited {
            used: request.usage.count(),
            limit: settings.free_tier_limit,
        });
    }

    debug!(free_tier, prd_chars = request.prd.chars().count(), "request admitted");
    Ok(Admission { api_key, free_tier })
}
