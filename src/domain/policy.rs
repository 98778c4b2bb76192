//! 도메인 정책(입력 길이 제한, JSON 재시도 예산).

pub const DEFAULT_MIN_PRD_CHARS: usize = 50;
pub const DEFAULT_MAX_PRD_CHARS: usize = 15_000;

/// PRD 길이 제한. 최소값은 trim 후, 최대값은 원문 기준으로 센다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_PRD_CHARS,
            max_chars: DEFAULT_MAX_PRD_CHARS,
        }
    }
}

/// 재시도 여부를 판단할 실패 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    ParseFailed,
    ProviderFailed,
}

/// 모델 응답 파싱 실패에 한해 재시도를 허용하는 예산.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

impl RetryPolicy {
    /// `attempts_made`회 시도 후 다시 호출할지 결정한다.
    /// provider 오류는 예산과 무관하게 재시도하지 않는다.
    pub fn should_retry(&self, attempts_made: u32, outcome: AttemptOutcome) -> bool {
        outcome == AttemptOutcome::ParseFailed && attempts_made < self.max_attempts
    }
}
