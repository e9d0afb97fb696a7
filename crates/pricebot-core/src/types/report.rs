//! 사이클 리포트 타입.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 한 사이클에서 만들어지는 시세 리포트.
///
/// 항상 다음 중 하나입니다:
/// - `Lines`: 비어 있지 않은 렌더링된 줄 목록 (종목당 한 줄)
/// - `Empty`: 일치하는 종목 없음
/// - `Error`: 조회/파싱 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum FormattedReport {
    Lines(Vec<String>),
    Empty,
    Error(String),
}

impl FormattedReport {
    /// 줄 목록으로 리포트를 생성합니다. 비어 있으면 `Empty`가 됩니다.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            Self::Empty
        } else {
            Self::Lines(lines)
        }
    }

    /// 에러 리포트를 생성합니다.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error(reason.into())
    }

    /// 전송할 줄 목록을 반환합니다.
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Self::Lines(lines) if !lines.is_empty() => Some(lines),
            _ => None,
        }
    }

    /// 메시지 본문 (줄바꿈으로 연결).
    pub fn text(&self) -> Option<String> {
        self.lines().map(|lines| lines.join("\n"))
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_none() && !matches!(self, Self::Error(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for FormattedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines(lines) => write!(f, "{}", lines.join("\n")),
            Self::Empty => write!(f, "(empty)"),
            Self::Error(reason) => write!(f, "(error: {})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_empty() {
        assert_eq!(FormattedReport::from_lines(vec![]), FormattedReport::Empty);
        assert!(FormattedReport::Empty.is_empty());
        assert_eq!(FormattedReport::Empty.text(), None);
    }

    #[test]
    fn test_text_joins_lines() {
        let report = FormattedReport::from_lines(vec![
            "Bitcoin: 1 Toman".to_string(),
            "Tether: 2 Toman".to_string(),
        ]);
        assert_eq!(
            report.text().as_deref(),
            Some("Bitcoin: 1 Toman\nTether: 2 Toman")
        );
        assert!(!report.is_empty());
        assert!(!report.is_error());
    }

    #[test]
    fn test_error_report_has_no_text() {
        let report = FormattedReport::error("connection: 503");
        assert!(report.is_error());
        assert!(!report.is_empty());
        assert_eq!(report.text(), None);
        assert_eq!(report.to_string(), "(error: connection: 503)");
    }
}
