//! 단일 사이클: 조회 → 게이트 → 전송.

use pricebot_core::{CycleOutcome, SuppressReason};
use pricebot_exchange::PriceSource;
use pricebot_notification::NotificationSender;
use tracing::debug;

use crate::gate::{should_deliver, suppression_reason};
use crate::scheduler::SchedulerState;

/// 사이클 하나를 실행하고 결과를 반환합니다.
///
/// 전송 실패는 `Failed`로 변환되며 재시도하지 않습니다.
pub async fn run_cycle(source: &dyn PriceSource, sender: &dyn NotificationSender) -> CycleOutcome {
    debug!(state = ?SchedulerState::Fetching, source = source.name());
    let report = source.fetch_report().await;

    debug!(state = ?SchedulerState::Gating, report = %report);
    if !should_deliver(&report) {
        debug!(state = ?SchedulerState::Skipping);
        let reason = suppression_reason(&report).unwrap_or(SuppressReason::Empty);
        return CycleOutcome::suppressed(reason);
    }
    let lines = report.lines().unwrap_or_default();
    let text = lines.join("\n");

    debug!(state = ?SchedulerState::Delivering, sender = sender.name());
    match sender.send(&text).await {
        Ok(()) => CycleOutcome::Delivered { lines: lines.len() },
        Err(e) => CycleOutcome::failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pricebot_core::FormattedReport;
    use pricebot_notification::{NotificationError, NotificationResult};
    use std::sync::Mutex;

    struct FixedSource(FormattedReport);

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn fetch_report(&self) -> FormattedReport {
            self.0.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[derive(Default)]
    struct RecordingSender {
        unauthorized: bool,
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn send(&self, text: &str) -> NotificationResult<()> {
            self.sent.lock().unwrap().push(text.to_string());
            if self.unauthorized {
                return Err(NotificationError::Unauthorized("Unauthorized".to_string()));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_delivers_lines() {
        let source = FixedSource(FormattedReport::Lines(vec![
            "Bitcoin: 2,345,000,000 Toman".to_string(),
            "Tether: 60,000 Toman".to_string(),
        ]));
        let sender = RecordingSender::default();

        let outcome = run_cycle(&source, &sender).await;

        assert_eq!(outcome, CycleOutcome::Delivered { lines: 2 });
        assert_eq!(
            *sender.sent.lock().unwrap(),
            vec!["Bitcoin: 2,345,000,000 Toman\nTether: 60,000 Toman".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_report_never_reaches_sender() {
        let sender = RecordingSender::default();
        let outcome = run_cycle(&FixedSource(FormattedReport::Empty), &sender).await;

        assert_eq!(outcome, CycleOutcome::suppressed(SuppressReason::Empty));
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_report_never_reaches_sender() {
        let sender = RecordingSender::default();
        let outcome = run_cycle(
            &FixedSource(FormattedReport::error("connection: 503")),
            &sender,
        )
        .await;

        assert_eq!(
            outcome,
            CycleOutcome::suppressed(SuppressReason::Error("connection: 503".to_string()))
        );
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_becomes_failed_outcome() {
        let sender = RecordingSender {
            unauthorized: true,
            ..Default::default()
        };
        let outcome = run_cycle(
            &FixedSource(FormattedReport::Lines(vec!["Bitcoin: 1 Toman".to_string()])),
            &sender,
        )
        .await;

        assert!(matches!(outcome, CycleOutcome::Failed { ref error } if error.contains("Unauthorized")));
    }
}
