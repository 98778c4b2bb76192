//! CLI 하위 명령 실행.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde_json::json;
use tokio::io::AsyncReadExt;

use crate::application::usecases::generate_stories::GenerateRequest;
use crate::domain::demo::{DEMO_PRD, demo_output};
use crate::domain::usage::UsageCounter;
use crate::interface::composition::AppComposition;
use crate::interface::http::run_server;

use super::command::{GenerateOptions, OutputFormat};

pub async fn run_serve(composition: AppComposition, bind: Option<String>) -> Result<()> {
    let addr = bind.unwrap_or_else(|| composition.config().bind_addr());
    run_server(Arc::new(composition), &addr).await
}

/// 로컬 실행은 서버 키를 호출자 키로 취급한다(무료 사용량 제한 없음).
pub async fn run_generate(composition: &AppComposition, options: GenerateOptions) -> Result<String> {
    let prd = read_input(&options.input).await?;
    let request = GenerateRequest {
        prd,
        config: options.config,
        api_key: composition.settings().server_key.clone(),
        usage: UsageCounter::default(),
    };

    let outcome = composition
        .generate_usecase()
        .execute(request)
        .await
        .map_err(|err| anyhow!("{} ({err})", err.public_message()))?;

    match options.format {
        OutputFormat::Json => serde_json::to_string_pretty(&outcome.response)
            .context("failed to serialize generated stories"),
        OutputFormat::Markdown => Ok(composition
            .export_markdown_usecase()
            .execute(&outcome.response)),
    }
}

pub fn run_demo() -> Result<String> {
    serde_json::to_string_pretty(&json!({
        "prd": DEMO_PRD,
        "output": demo_output(),
    }))
    .context("failed to serialize demo output")
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read PRD from stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read PRD file: {input}"))
}
