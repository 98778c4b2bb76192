//! 모델 응답 텍스트에서 JSON 객체를 관대하게 추출한다.
//!
//! 모델이 지시와 달리 코드 펜스나 앞뒤 설명을 붙이는 경우를 허용한다.
//! 스키마 검증은 여기서 하지 않는다(`validate` 모듈 담당).

use serde_json::Value;

/// 추출/파싱에 실패하면 `None`. 절대 panic하지 않는다.
pub fn try_parse_stories(text: &str) -> Option<Value> {
    let mut body = text.trim();

    if body.starts_with("```") {
        body = strip_code_fence(body);
    }

    if !body.starts_with('{')
        && let (Some(start), Some(end)) = (body.find('{'), body.rfind('}'))
        && end > start
    {
        body = &body[start..=end];
    }

    serde_json::from_str(body).ok()
}

/// 여는 펜스(```, ```json)와 닫는 펜스를 한 번씩 제거한다.
fn strip_code_fence(text: &str) -> &str {
    let mut body = text.strip_prefix("```").unwrap_or(text);
    body = body.strip_prefix("json").unwrap_or(body);
    body = body.strip_prefix('\n').unwrap_or(body);

    if let Some(rest) = body.strip_suffix("```") {
        body = rest.strip_suffix('\n').unwrap_or(rest);
    }
    body
}
