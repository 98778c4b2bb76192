//! 텍스트 생성 provider 구현 모듈.

pub mod anthropic;
mod api_runner;

pub use anthropic::{AnthropicClient, AnthropicSettings};
pub use api_runner::build_api_client;
