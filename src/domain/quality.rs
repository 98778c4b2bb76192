//! 입력 텍스트가 요구사항 문서처럼 보이는지 판단하는 저비용 사전 필터.
//!
//! 분류기가 아니다. 명백히 무관한 텍스트를 API 호출 전에 걸러내는 용도이며
//! 오탐/미탐을 허용한다.

/// 제품/비즈니스/소프트웨어 문서에 흔한 단어 사전.
const SIGNAL_VOCABULARY: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i",
    "it", "for", "not", "on", "with", "as", "you", "do", "at", "this",
    "but", "by", "from", "they", "we", "or", "an", "will", "my", "one",
    "all", "would", "there", "their", "what", "so", "up", "out", "if", "about",
    "who", "get", "which", "go", "me", "when", "make", "can", "like", "time",
    "no", "just", "know", "take", "into", "your", "good", "some", "could", "them",
    "see", "other", "now", "only", "think", "also", "after", "use", "how", "our",
    "work", "first", "well", "way", "new", "want", "because", "any", "should", "need",
    "build", "user", "users", "feature", "page", "app", "data", "system", "api", "create",
    "add", "update", "delete", "search", "filter", "sort", "display", "show", "send", "login",
    "payment", "notification", "dashboard", "profile", "settings", "admin", "report", "product", "service", "team",
    "project", "mobile", "web", "design", "test", "database", "server", "client",
];

const MIN_TOKENS: usize = 5;
const MIN_SIGNAL_RATIO: f64 = 0.30;

/// 소문자 라틴 알파벳 토큰 중 사전 단어 비율이 30% 이상이면 true.
pub fn has_min_quality(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|token| token.len() > 1)
        .collect();

    if tokens.len() < MIN_TOKENS {
        return false;
    }

    let hits = tokens
        .iter()
        .filter(|token| SIGNAL_VOCABULARY.contains(token))
        .count();
    hits as f64 / tokens.len() as f64 >= MIN_SIGNAL_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_five_tokens() {
        assert!(!has_min_quality("user login page"));
        assert!(!has_min_quality("the user a b c d e f"));
        assert!(!has_min_quality(""));
    }

    #[test]
    fn accepts_text_built_from_vocabulary() {
        let text = SIGNAL_VOCABULARY.join(" ");
        assert!(has_min_quality(&text));
    }

    #[test]
    fn rejects_random_non_vocabulary_words() {
        let letters: Vec<char> = ('a'..='z').collect();
        let words: Vec<String> = (0..1000)
            .map(|i| {
                format!(
                    "qx{}{}{}",
                    letters[i % 26],
                    letters[(i / 26) % 26],
                    letters[(i / 676) % 26]
                )
            })
            .collect();
        assert!(!has_min_quality(&words.join(" ")));
    }

    #[test]
    fn accepts_realistic_feature_text() {
        let prd = "Users should be able to manage their notification preferences, \
                   choose which notifications they receive and opt out of marketing.";
        assert!(has_min_quality(prd));
    }

    #[test]
    fn ignores_digits_and_punctuation() {
        assert!(!has_min_quality("1234 5678 !!!! ???? #### $$$$ %%%%"));
        assert!(has_min_quality("User: login, search, filter & sort the dashboard!"));
    }
}
