//! 무료 사용량 쿠키 읽기/쓰기.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use crate::domain::usage::{USAGE_COOKIE_MAX_AGE_SECS, USAGE_COOKIE_NAME, UsageCounter};

/// 요청의 `Cookie` 헤더들에서 사용량 카운터를 읽는다. 없거나 깨진 값은 0이다.
pub fn read_usage(headers: &HeaderMap) -> UsageCounter {
    let value = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|raw| raw.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == USAGE_COOKIE_NAME)
        .map(|(_, value)| value.trim());
    UsageCounter::from_cookie(value)
}

/// `Set-Cookie` 헤더 값을 만든다.
pub fn usage_set_cookie(usage: UsageCounter, secure: bool) -> String {
    let mut cookie = format!(
        "{USAGE_COOKIE_NAME}={}; Max-Age={USAGE_COOKIE_MAX_AGE_SECS}; Path=/; HttpOnly; SameSite=Lax",
        usage.cookie_value()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_counter_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            COOKIE,
            HeaderValue::from_static("session=abc; userstory-usage=2; lang=en"),
        );
        assert_eq!(read_usage(&headers), UsageCounter::new(2));
    }

    #[test]
    fn missing_or_garbage_counter_reads_as_zero() {
        assert_eq!(read_usage(&HeaderMap::new()), UsageCounter::new(0));

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("userstory-usage=lots"));
        assert_eq!(read_usage(&headers), UsageCounter::new(0));
    }

    #[test]
    fn set_cookie_carries_attributes() {
        let cookie = usage_set_cookie(UsageCounter::new(3), false);
        assert_eq!(
            cookie,
            "userstory-usage=3; Max-Age=2592000; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(usage_set_cookie(UsageCounter::new(1), true).ends_with("; Secure"));
    }
}
