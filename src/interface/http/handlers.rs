//! HTTP 요청 핸들러.

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::application::usecases::generate_stories::GenerateRequest;
use crate::domain::demo::{DEMO_PRD, demo_output};
use crate::domain::error::{GENERIC_FAILURE, GenerationError};
use crate::domain::story::{GenerationConfig, GenerationResponse};

use super::AppState;
use super::usage_cookie::{read_usage, usage_set_cookie};

const INVALID_BODY: &str = "Invalid request body.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub prd: String,
    #[serde(default)]
    pub config: GenerationConfig,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    needs_key: Option<bool>,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct DemoBody {
    prd: &'static str,
    output: GenerationResponse,
}

fn error_response(status: StatusCode, message: impl Into<String>, needs_key: bool) -> Response {
    let body = ErrorBody {
        error: message.into(),
        needs_key: needs_key.then_some(true),
    };
    (status, Json(body)).into_response()
}

fn generation_error_response(err: &GenerationError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(status = status.as_u16(), error = %err, "generation failed");
    } else {
        warn!(status = status.as_u16(), error = %err, "generation rejected");
    }
    error_response(status, err.public_message(), err.needs_key())
}

/// 본문 파싱 실패는 프레임워크 기본 텍스트 대신 `{error}` JSON으로 응답한다.
fn rejection_response(rejection: &JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "malformed request body");
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    error_response(status, INVALID_BODY, false)
}

/// `POST /api/generate`
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    let request = GenerateRequest {
        prd: body.prd,
        config: body.config,
        api_key: body.api_key,
        usage: read_usage(&headers),
    };

    let timeout = Duration::from_secs(state.config().request_timeout_secs());
    let use_case = state.generate_usecase();
    let outcome = match tokio::time::timeout(timeout, use_case.execute(request)).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => return generation_error_response(&err),
        Err(_) => {
            error!(timeout_secs = timeout.as_secs(), "generation timed out");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE, false);
        }
    };

    let mut response = Json(outcome.response).into_response();
    if let Some(usage) = outcome.usage {
        let cookie = usage_set_cookie(usage, state.config().secure_cookies());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(err) => warn!(error = %err, "failed to encode usage cookie"),
        }
    }
    response
}

/// `POST /api/export/markdown`
pub async fn export_markdown(
    State(state): State<AppState>,
    payload: Result<Json<GenerationResponse>, JsonRejection>,
) -> Response {
    let Json(generation) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };
    let markdown = state.export_markdown_usecase().execute(&generation);
    ([(CONTENT_TYPE, "text/markdown; charset=utf-8")], markdown).into_response()
}

/// `GET /api/demo`
pub async fn demo() -> impl IntoResponse {
    Json(DemoBody {
        prd: DEMO_PRD,
        output: demo_output(),
    })
}

/// `GET /api/health`
pub async fn health() -> impl IntoResponse {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
