//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::domain::error::{ProviderError, ProviderErrorKind};

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout: Duration) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패를 `ProviderError`로 분류한다.
/// 전송 계층 실패(타임아웃/연결 오류)는 `Unknown`이다.
pub async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request.send().await.map_err(|err| {
        ProviderError::new(
            ProviderErrorKind::Unknown,
            format!("{provider_name}: failed to {action}: {err}"),
        )
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        ProviderError::new(
            ProviderErrorKind::Unknown,
            format!("{provider_name}: failed to read {action} response body: {err}"),
        )
    })?;

    if !status.is_success() {
        return Err(ProviderError::new(
            ProviderErrorKind::classify(Some(status.as_u16()), &body),
            format!("{provider_name}: {action} failed ({status}): {body}"),
        ));
    }

    serde_json::from_str(&body).map_err(|err| {
        ProviderError::new(
            ProviderErrorKind::Unknown,
            format!("{provider_name}: invalid JSON response while {action}: {err}"),
        )
    })
}
