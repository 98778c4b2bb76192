//! HTTP API(axum) 모듈.
//!
//! 라우팅과 미들웨어만 여기서 정의하고, 요청 처리는 `handlers`에 둔다.

mod handlers;
mod usage_cookie;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::interface::composition::AppComposition;

/// 요청 본문 최대 크기. 최대 길이 PRD를 문자마다 `\uXXXX\uXXXX`(12바이트)로
/// 이스케이프해도 들어가야 한다. 길이 초과는 본문 한도가 아니라 TooLong(400)으로 응답한다.
pub const BODY_LIMIT_BYTES: usize = 256 * 1024;

pub type AppState = Arc<AppComposition>;

/// HTTP 라우터를 생성한다.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/export/markdown", post(handlers::export_markdown))
        .route("/api/demo", get(handlers::demo))
        .route("/api/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 서버를 시작하고 Ctrl-C(SIGINT)를 받으면 진행 중 요청을 마친 뒤 종료한다.
pub async fn run_server(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("storypilot listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server terminated unexpectedly")?;

    info!("storypilot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // 시그널 핸들러 등록 실패 시 종료 신호 없이 계속 동작한다.
        std::future::pending::<()>().await;
    }
}
