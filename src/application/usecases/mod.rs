//! 애플리케이션 유스케이스 모음.

pub mod export_markdown;
pub mod generate_stories;
pub mod inspect_config;
