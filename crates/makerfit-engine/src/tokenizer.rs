//! Free-text tokenizer shared by the scorer and the strict-mode signal builder.

use std::sync::LazyLock;

use regex::Regex;

/// Generic business words that carry no matching signal on their own.
pub const STOPWORDS: &[&str] = &[
    "업무", "관리", "문제", "불편", "현재", "사용", "필요", "처리", "작업", "시스템", "도구",
    "기능", "서비스", "회사", "팀", "담당", "운영", "개선", "효율", "데이터",
];

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9가-힣]+").expect("valid separator regex"));

/// Split text into lower-cased tokens.
///
/// Runs of anything other than ASCII letters, digits or Hangul syllables
/// separate tokens. Single-character tokens and [`STOPWORDS`] are dropped.
/// Order and duplicates are preserved.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATOR
        .split(&lowered)
        .filter(|token| token.chars().count() > 1)
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}
