//! 스토리 내보내기용 Markdown 렌더링 모듈.

use crate::domain::story::{GenerationResponse, UserStory};

/// 스토리 하나를 Markdown 블록으로 만든다.
pub fn render_story_markdown(story: &UserStory) -> String {
    let mut out = String::new();
    out.push_str(&format!("## {}: {}\n\n", story.id, story.title));
    out.push_str(&format!("**{}**\n\n", story.description));
    out.push_str(&format!(
        "**Epic:** {} | **Points:** {}\n\n",
        story.epic, story.story_points
    ));
    out.push_str("### Acceptance Criteria\n\n");

    for (label, items) in story.acceptance_criteria.categories() {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("**{label}:**\n"));
        for item in items {
            out.push_str(&format!("- {item}\n"));
        }
        out.push('\n');
    }

    if !story.flags.is_empty() {
        out.push_str(&format!("**Flags:** {}\n\n", story.flags.join(", ")));
    }
    if !story.tech_notes.is_empty() {
        out.push_str(&format!("**Tech Notes:** {}\n", story.tech_notes));
    }
    out
}

/// 전체 결과를 구분선(`---`)으로 이어 붙인다.
pub fn render_all_markdown(response: &GenerationResponse) -> String {
    response
        .stories
        .iter()
        .map(render_story_markdown)
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo::demo_output;
    use crate::domain::story::{AcceptanceCriteria, Points};

    fn story() -> UserStory {
        UserStory {
            id: "US-007".to_string(),
            title: "Export report".to_string(),
            description: "As a manager, I want to export a report".to_string(),
            acceptance_criteria: AcceptanceCriteria {
                functional: vec!["CSV download works".to_string()],
                accessibility: vec![],
                performance: vec![],
                error_handling: vec!["Shows retry on failure".to_string()],
            },
            story_points: Points::from("M"),
            epic: "Reporting".to_string(),
            flags: vec![],
            tech_notes: String::new(),
        }
    }

    #[test]
    fn story_block_skips_empty_sections() {
        let md = render_story_markdown(&story());
        assert_eq!(
            md,
            "## US-007: Export report\n\n**As a manager, I want to export a report**\n\n\
             **Epic:** Reporting | **Points:** M\n\n### Acceptance Criteria\n\n\
             **Functional:**\n- CSV download works\n\n\
             **Error Handling:**\n- Shows retry on failure\n\n"
        );
    }

    #[test]
    fn flags_and_notes_are_appended() {
        let mut story = story();
        story.flags = vec!["Needs design".to_string(), "Unclear scope".to_string()];
        story.tech_notes = "Reuse export queue".to_string();
        let md = render_story_markdown(&story);
        assert!(md.ends_with(
            "**Flags:** Needs design, Unclear scope\n\n**Tech Notes:** Reuse export queue\n"
        ));
    }

    #[test]
    fn stories_are_separated_by_rule() {
        let md = render_all_markdown(&demo_output());
        assert_eq!(md.matches("\n---\n\n").count(), 1);
        assert!(md.starts_with("## US-001: "));
        assert!(md.contains("## US-002: Configure quiet hours"));
    }
}
