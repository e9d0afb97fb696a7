//! 전송 게이트.
//!
//! 구조화된 리포트 타입만 보고 판단합니다. 메시지 내용은 검사하지 않습니다.

use pricebot_core::{FormattedReport, SuppressReason};

/// 리포트가 비어 있지 않은 줄 목록일 때만 `true`.
pub fn should_deliver(report: &FormattedReport) -> bool {
    report.lines().is_some()
}

/// 전송하지 않을 리포트의 억제 사유. 전송 대상이면 `None`.
pub fn suppression_reason(report: &FormattedReport) -> Option<SuppressReason> {
    match report {
        FormattedReport::Error(reason) => Some(SuppressReason::Error(reason.clone())),
        _ if should_deliver(report) => None,
        _ => Some(SuppressReason::Empty),
    }
}
