//! 생성 결과를 JIRA 등에 붙여넣을 마크다운으로 변환하는 유스케이스.

use crate::application::ports::MarkdownRenderer;
use crate::domain::story::GenerationResponse;

pub struct ExportMarkdownUseCase<'a> {
    pub renderer: &'a dyn MarkdownRenderer,
}

impl<'a> ExportMarkdownUseCase<'a> {
    /// 전체 스토리를 구분선(`---`)으로 이어 붙인 문서를 만든다.
    pub fn execute(&self, response: &GenerationResponse) -> String {
        self.renderer.render_all(response)
    }
}
