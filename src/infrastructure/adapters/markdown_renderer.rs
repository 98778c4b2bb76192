//! 마크다운 렌더링 포트 구현 어댑터.

use crate::application::ports::MarkdownRenderer;
use crate::domain::story::GenerationResponse;
use crate::infrastructure::render;

pub struct MarkdownRendererAdapter;

impl MarkdownRenderer for MarkdownRendererAdapter {
    fn render_all(&self, response: &GenerationResponse) -> String {
        render::render_all_markdown(response)
    }
}
