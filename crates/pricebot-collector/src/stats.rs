//! 사이클 통계 구조체.

use chrono::{DateTime, Utc};
use pricebot_core::{CycleOutcome, SuppressReason};
use serde::{Deserialize, Serialize};

/// 스케줄러 실행 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStats {
    /// 실행한 사이클 수 (시스템 장애 포함)
    pub cycles: usize,
    /// 전송 성공
    pub delivered: usize,
    /// 빈 리포트로 억제
    pub suppressed_empty: usize,
    /// 에러 리포트로 억제
    pub suppressed_error: usize,
    /// 전송 실패
    pub failed: usize,
    /// 사이클 도중 패닉 (연장 대기)
    pub systemic_failures: usize,
    /// 마지막 전송 성공 시각
    pub last_delivered_at: Option<DateTime<Utc>>,
}

impl CycleStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 사이클 결과를 반영합니다.
    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Delivered { .. } => {
                self.delivered += 1;
                self.last_delivered_at = Some(Utc::now());
            }
            CycleOutcome::Suppressed {
                reason: SuppressReason::Empty,
            } => self.suppressed_empty += 1,
            CycleOutcome::Suppressed {
                reason: SuppressReason::Error(_),
            } => self.suppressed_error += 1,
            CycleOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// 시스템 장애를 반영합니다.
    pub fn record_systemic_failure(&mut self) {
        self.cycles += 1;
        self.systemic_failures += 1;
    }

    /// 전송 성공률 (%)
    pub fn delivery_rate(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            (self.delivered as f64 / self.cycles as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        tracing::info!(
            cycles = self.cycles,
            delivered = self.delivered,
            suppressed_empty = self.suppressed_empty,
            suppressed_error = self.suppressed_error,
            failed = self.failed,
            systemic_failures = self.systemic_failures,
            delivery_rate = format!("{:.1}%", self.delivery_rate()),
            last_delivered_at = ?self.last_delivered_at,
            "스케줄러 통계"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut stats = CycleStats::new();
        stats.record(&CycleOutcome::Delivered { lines: 3 });
        stats.record(&CycleOutcome::suppressed(SuppressReason::Empty));
        stats.record(&CycleOutcome::suppressed(SuppressReason::Error("parse: x".into())));
        stats.record(&CycleOutcome::failed("Unauthorized"));
        stats.record_systemic_failure();

        assert_eq!(stats.cycles, 5);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.suppressed_empty, 1);
        assert_eq!(stats.suppressed_error, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.systemic_failures, 1);
        assert!(stats.last_delivered_at.is_some());
        assert!((stats.delivery_rate() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = CycleStats::new();
        assert_eq!(stats.delivery_rate(), 0.0);
        assert_eq!(stats.last_delivered_at, None);
    }
}
