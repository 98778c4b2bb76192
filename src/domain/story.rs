//! 사용자 스토리 생성 도메인 엔티티/값 객체.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// 인수 조건 상세도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Light,
    #[default]
    Detailed,
}

/// 스토리 포인트 산정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointScale {
    #[default]
    Fibonacci,
    Tshirt,
    None,
}

/// 모든 관련 스토리의 인수 조건에 주입할 품질 속성.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossCutting {
    pub accessibility: bool,
    pub security: bool,
    pub performance: bool,
    pub error_handling: bool,
    pub compliance: bool,
}

impl Default for CrossCutting {
    fn default() -> Self {
        Self {
            accessibility: true,
            security: true,
            performance: true,
            error_handling: true,
            compliance: false,
        }
    }
}

/// 요청 단위 생성 설정. 서버에 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    pub detail_level: DetailLevel,
    pub point_scale: PointScale,
    pub cross_cutting: CrossCutting,
}

/// 숫자(Fibonacci) 또는 문자열(T-shirt) 포인트.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Points {
    Number(Number),
    Label(String),
}

impl Default for Points {
    fn default() -> Self {
        Self::Number(Number::from(0))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl Points {
    pub fn number(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for Points {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcceptanceCriteria {
    pub functional: Vec<String>,
    pub accessibility: Vec<String>,
    pub performance: Vec<String>,
    pub error_handling: Vec<String>,
}

impl AcceptanceCriteria {
    /// 표시 순서가 고정된 (라벨, 항목) 목록.
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Functional", &self.functional),
            ("Accessibility", &self.accessibility),
            ("Performance", &self.performance),
            ("Error Handling", &self.error_handling),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub acceptance_criteria: AcceptanceCriteria,
    #[serde(default, deserialize_with = "null_as_default")]
    pub story_points: Points,
    #[serde(default, deserialize_with = "null_as_default")]
    pub epic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_notes: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub total_stories: u64,
    pub total_points: Points,
    #[serde(default)]
    pub epics: Vec<String>,
}

impl GenerationSummary {
    /// 모델이 요약을 주지 않았을 때 스토리 목록에서 요약을 계산한다.
    /// 숫자 포인트만 합산하며, 문자열 포인트가 섞이거나 합계가 넘치면 "n/a"가 된다.
    pub fn derive_from(stories: &[UserStory]) -> Self {
        let mut total: Option<u64> = Some(0);
        let mut epics: Vec<String> = Vec::new();

        for story in stories {
            total = match &story.story_points {
                Points::Number(n) => {
                    total.and_then(|sum| sum.checked_add(n.as_u64().unwrap_or(0)))
                }
                Points::Label(_) => None,
            };
            if !story.epic.is_empty() && !epics.contains(&story.epic) {
                epics.push(story.epic.clone());
            }
        }

        Self {
            total_stories: stories.len() as u64,
            total_points: total.map_or_else(|| Points::from("n/a"), Points::number),
            epics,
        }
    }
}

/// 모델이 `null`을 넣은 필드는 누락과 같게 취급한다.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 생성 결과 전체.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationResponse {
    pub stories: Vec<UserStory>,
    pub summary: GenerationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_form_defaults() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.detail_level, DetailLevel::Detailed);
        assert_eq!(config.point_scale, PointScale::Fibonacci);
        assert!(config.cross_cutting.error_handling);
        assert!(!config.cross_cutting.compliance);
    }

    #[test]
    fn config_reads_camel_case_wire_names() {
        let raw = r#"{
            "detailLevel": "light",
            "pointScale": "tshirt",
            "crossCutting": { "errorHandling": false, "compliance": true }
        }"#;
        let config: GenerationConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.detail_level, DetailLevel::Light);
        assert_eq!(config.point_scale, PointScale::Tshirt);
        assert!(!config.cross_cutting.error_handling);
        assert!(config.cross_cutting.compliance);
        assert!(config.cross_cutting.accessibility);
    }

    #[test]
    fn points_accept_numbers_and_labels() {
        let n: Points = serde_json::from_str("5").unwrap();
        let l: Points = serde_json::from_str("\"XL\"").unwrap();
        assert_eq!(n.to_string(), "5");
        assert_eq!(l.to_string(), "XL");
        assert_eq!(serde_json::to_string(&n).unwrap(), "5");
    }

    #[test]
    fn null_story_fields_read_as_defaults() {
        let raw = r#"{"id":"US-001","title":"t","storyPoints":null,"flags":null,"techNotes":null}"#;
        let story: UserStory = serde_json::from_str(raw).unwrap();
        assert_eq!(story.story_points, Points::default());
        assert!(story.flags.is_empty());
        assert!(story.tech_notes.is_empty());
    }

    #[test]
    fn derived_summary_falls_back_to_na_for_tshirt_sizes() {
        let story = |id: &str, points: Points, epic: &str| UserStory {
            id: id.to_string(),
            title: "t".to_string(),
            description: String::new(),
            acceptance_criteria: AcceptanceCriteria::default(),
            story_points: points,
            epic: epic.to_string(),
            flags: Vec::new(),
            tech_notes: String::new(),
        };

        let numeric = GenerationSummary::derive_from(&[
            story("US-001", Points::number(3), "A"),
            story("US-002", Points::number(5), "B"),
            story("US-003", Points::number(2), "A"),
        ]);
        assert_eq!(numeric.total_stories, 3);
        assert_eq!(numeric.total_points, Points::number(10));
        assert_eq!(numeric.epics, vec!["A".to_string(), "B".to_string()]);

        let sized = GenerationSummary::derive_from(&[story("US-001", Points::from("M"), "A")]);
        assert_eq!(sized.total_points.to_string(), "n/a");

        let huge = GenerationSummary::derive_from(&[
            story("US-001", Points::number(u64::MAX), "A"),
            story("US-002", Points::number(1), "A"),
        ]);
        assert_eq!(huge.total_points.to_string(), "n/a");
        assert_eq!(huge.total_stories, 2);
    }
}
