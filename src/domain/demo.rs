//! 내장 예시 PRD와 그 생성 결과.

use crate::domain::story::{
    AcceptanceCriteria, GenerationResponse, GenerationSummary, Points, UserStory,
};

pub const DEMO_PRD: &str = "Users should be able to manage their notification preferences — choose which notifications they receive (email, push, in-app), set quiet hours, and opt out of marketing communications.";

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn demo_output() -> GenerationResponse {
    let stories = vec![
        UserStory {
            id: "US-001".to_string(),
            title: "Set notification channel preferences".to_string(),
            description: "As a user, I want to choose which channels I receive notifications on (email, push, in-app) so that I only get notified where I want.".to_string(),
            acceptance_criteria: AcceptanceCriteria {
                functional: lines(&[
                    "User can toggle email, push, and in-app notifications independently",
                    "Preferences persist across sessions and devices",
                    "Changes take effect within 30 seconds — no app restart needed",
                ]),
                accessibility: lines(&[
                    "All toggles have ARIA labels and are keyboard accessible",
                    "State changes announced to screen readers",
                ]),
                performance: lines(&["Preferences page loads within 1 second"]),
                error_handling: lines(&[
                    "Network failure shows retry option — unsaved changes are not lost",
                    "Conflicting updates from multiple devices resolved with last-write-wins",
                ]),
            },
            story_points: Points::number(3),
            epic: "Notification Preferences".to_string(),
            flags: Vec::new(),
            tech_notes: "Store preferences server-side with user profile. Optimistic UI update with rollback on failure.".to_string(),
        },
        UserStory {
            id: "US-002".to_string(),
            title: "Configure quiet hours".to_string(),
            description: "As a user, I want to set quiet hours so that I'm not disturbed by notifications during specific times.".to_string(),
            acceptance_criteria: AcceptanceCriteria {
                functional: lines(&[
                    "User sets start and end time for quiet hours",
                    "Notifications are queued during quiet hours and delivered after",
                    "Supports user's local timezone — handles DST transitions",
                ]),
                accessibility: lines(&[
                    "Time picker is keyboard navigable and screen-reader compatible",
                ]),
                performance: lines(&[
                    "Quiet hours check adds < 50ms latency to notification delivery",
                ]),
                error_handling: lines(&[
                    "Invalid time range (start after end) shows clear inline error",
                    "If timezone detection fails, prompt user to select manually",
                ]),
            },
            story_points: Points::number(5),
            epic: "Notification Preferences".to_string(),
            flags: lines(&["Timezone handling adds complexity"]),
            tech_notes: "Evaluate server-side vs client-side timezone resolution. Store as UTC offsets.".to_string(),
        },
    ];

    GenerationResponse {
        stories,
        summary: GenerationSummary {
            total_stories: 2,
            total_points: Points::number(8),
            epics: lines(&["Notification Preferences"]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_summary_matches_stories() {
        let demo = demo_output();
        assert_eq!(demo.summary, GenerationSummary::derive_from(&demo.stories));
    }
}
