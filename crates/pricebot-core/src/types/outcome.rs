//! 사이클 결과 타입.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 리포트를 전송하지 않은 이유.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "reason", rename_all = "snake_case")]
pub enum SuppressReason {
    /// 일치하는 종목 없음
    Empty,
    /// 조회/파싱 실패
    Error(String),
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// 스케줄러 한 틱의 결과. 로깅/통계 용도로만 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// 리포트 전송 완료
    Delivered { lines: usize },
    /// 전송 억제
    Suppressed { reason: SuppressReason },
    /// 전송 실패
    Failed { error: String },
}

impl CycleOutcome {
    pub fn suppressed(reason: SuppressReason) -> Self {
        Self::Suppressed { reason }
    }

    pub fn failed(error: impl fmt::Display) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    /// 로그 필드용 이름.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Delivered { .. } => "delivered",
            Self::Suppressed { .. } => "suppressed",
            Self::Failed { .. } => "failed",
        }
    }

    /// 사이클 결과 이벤트를 기록합니다.
    pub fn log(&self) {
        match self {
            Self::Delivered { lines } => {
                tracing::info!(outcome = self.name(), lines = *lines, "시세 전송 완료");
            }
            Self::Suppressed { reason } => {
                tracing::info!(outcome = self.name(), reason = %reason, "시세 전송 생략");
            }
            Self::Failed { error } => {
                tracing::error!(outcome = self.name(), error = %error, "시세 전송 실패");
            }
        }
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered { lines } => write!(f, "Delivered({} lines)", lines),
            Self::Suppressed { reason } => write!(f, "Suppressed({})", reason),
            Self::Failed { error } => write!(f, "Failed({})", error),
        }
    }
}
