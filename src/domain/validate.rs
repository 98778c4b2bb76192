//! 추출된 JSON의 구조 검증.
//!
//! `stories`가 비어 있지 않은 배열이어야 한다. 개별 스토리는 관대하게 읽고,
//! `id`/`title`이 없는 스토리만 버린다. 일부가 깨져도 배치 전체는 살린다.

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::error::GenerationError;
use crate::domain::story::{
    AcceptanceCriteria, GenerationResponse, GenerationSummary, Points, UserStory,
};

pub fn validate_generation(value: Value) -> Result<GenerationResponse, GenerationError> {
    let Value::Object(mut root) = value else {
        return Err(GenerationError::NoStories);
    };

    let Some(Value::Array(raw_stories)) = root.remove("stories") else {
        return Err(GenerationError::NoStories);
    };
    if raw_stories.is_empty() {
        return Err(GenerationError::NoStories);
    }

    let total = raw_stories.len();
    let stories: Vec<UserStory> = raw_stories
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let story = decode_story(raw);
            if story.is_none() {
                warn!(index = idx, "dropping story without id or title");
            }
            story
        })
        .collect();

    if stories.is_empty() {
        warn!(total, "every story in the completion was malformed");
        return Err(GenerationError::NoStories);
    }

    let summary = root
        .remove("summary")
        .and_then(|raw| serde_json::from_value::<GenerationSummary>(raw).ok())
        .unwrap_or_else(|| GenerationSummary::derive_from(&stories));

    if summary.total_stories != stories.len() as u64 {
        warn!(
            reported = summary.total_stories,
            actual = stories.len(),
            "summary.totalStories does not match story count"
        );
    }

    Ok(GenerationResponse { stories, summary })
}

/// 필드 단위로 읽고 타입이 맞지 않는 필드는 기본값으로 둔다.
/// `id`/`title`이 없거나 문자열/숫자가 아니면 `None`.
fn decode_story(raw: Value) -> Option<UserStory> {
    let Value::Object(fields) = raw else {
        return None;
    };

    Some(UserStory {
        id: scalar_text(fields.get("id"))?,
        title: scalar_text(fields.get("title"))?,
        description: text_or_default(fields.get("description")),
        acceptance_criteria: match fields.get("acceptanceCriteria") {
            Some(Value::Object(criteria)) => decode_criteria(criteria),
            _ => AcceptanceCriteria::default(),
        },
        story_points: match fields.get("storyPoints") {
            Some(Value::Number(n)) => Points::Number(n.clone()),
            Some(Value::String(label)) => Points::Label(label.clone()),
            _ => Points::default(),
        },
        epic: text_or_default(fields.get("epic")),
        flags: text_list(fields.get("flags")),
        tech_notes: text_or_default(fields.get("techNotes")),
    })
}

fn decode_criteria(criteria: &Map<String, Value>) -> AcceptanceCriteria {
    AcceptanceCriteria {
        functional: text_list(criteria.get("functional")),
        accessibility: text_list(criteria.get("accessibility")),
        performance: text_list(criteria.get("performance")),
        error_handling: text_list(criteria.get("errorHandling")),
    }
}

/// 숫자 id/title은 문자열로 바꾼다. 빈 문자열은 없는 것으로 본다.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or_default(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}

/// 배열이면 문자열 항목만 남기고, 단일 문자열은 한 항목짜리 목록으로 읽는다.
fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(text)) if !text.trim().is_empty() => vec![text.clone()],
        _ => Vec::new(),
    }
}
