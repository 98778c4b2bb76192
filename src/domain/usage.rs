//! 무료 사용량 카운터.
//!
//! 값은 클라이언트 쿠키에만 존재하며 서버는 제시된 값을 그대로 신뢰한다.
//! 보안 통제가 아닌 안내용 카운터다. 서버 측 저장소(IP/세션 키 → 횟수)로
//! 교체해도 요청/응답 계약은 바뀌지 않는다.

pub const USAGE_COOKIE_NAME: &str = "userstory-usage";
pub const USAGE_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;
pub const DEFAULT_FREE_TIER_LIMIT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageCounter(u32);

impl UsageCounter {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    /// 쿠키 값 앞부분의 십진 숫자만 읽는다(`"3.5"`, `"3abc"` → 3).
    /// 숫자로 시작하지 않으면 0, 범위를 넘으면 `u32::MAX`로 본다.
    pub fn from_cookie(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim) else {
            return Self(0);
        };
        let raw = raw.strip_prefix('+').unwrap_or(raw);
        let digits = raw.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Self(0);
        }
        Self(raw[..digits].parse::<u32>().unwrap_or(u32::MAX))
    }

    pub fn count(self) -> u32 {
        self.0
    }

    pub fn is_exhausted(self, limit: u32) -> bool {
        self.0 >= limit
    }

    /// 성공한 무료 생성 1회를 반영한 값.
    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn cookie_value(self) -> String {
        self.0.to_string()
    }
}
