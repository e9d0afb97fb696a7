//! 스케줄러 루프 타이밍 / 복원력 테스트 (가상 시간).

use async_trait::async_trait;
use pricebot_collector::{CycleStats, Scheduler};
use pricebot_core::{FormattedReport, ScheduleSettings};
use pricebot_exchange::PriceSource;
use pricebot_notification::{NotificationError, NotificationResult, NotificationSender};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

enum Step {
    Report(FormattedReport),
    Panic,
    Hang,
}

/// 미리 정한 순서대로 리포트를 돌려주는 소스. 소진 후에는 마지막 리포트를 반복.
struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    fallback: FormattedReport,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>, fallback: FormattedReport) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn always(report: FormattedReport) -> Arc<Self> {
        Self::new(Vec::new(), report)
    }

    /// 첫 호출 기준 상대 호출 시각 (초)
    fn call_offsets(&self) -> Vec<u64> {
        let calls = self.calls.lock().unwrap();
        let Some(first) = calls.first().copied() else {
            return Vec::new();
        };
        calls.iter().map(|t| (*t - first).as_secs()).collect()
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch_report(&self) -> FormattedReport {
        self.calls.lock().unwrap().push(Instant::now());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Report(report)) => report,
            Some(Step::Panic) => panic!("unexpected payload"),
            Some(Step::Hang) => std::future::pending().await,
            None => self.fallback.clone(),
        }
    }

    fn name(&self) -> &str {
        "scripted"
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
        if self.unauthorized {
            return Err(NotificationError::Unauthorized("Unauthorized".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn schedule() -> ScheduleSettings {
    ScheduleSettings {
        interval: Duration::from_secs(60),
        failure_interval: Duration::from_secs(300),
    }
}

fn bitcoin_report() -> FormattedReport {
    FormattedReport::Lines(vec!["Bitcoin: 2,345,000,000 Toman".to_string()])
}

/// 스케줄러를 `duration` 동안 실행한 뒤 종료하고 통계를 반환합니다.
async fn run_for(
    source: Arc<ScriptedSource>,
    sender: Arc<RecordingSender>,
    duration: Duration,
) -> CycleStats {
    let shutdown = CancellationToken::new();
    let scheduler = Scheduler::new(source, sender, schedule());
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    tokio::time::sleep(duration).await;
    shutdown.cancel();
    handle.await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_delivers_every_interval() {
    let source = ScriptedSource::always(bitcoin_report());
    let sender = Arc::new(RecordingSender::default());

    let stats = run_for(source.clone(), sender.clone(), Duration::from_secs(150)).await;

    assert_eq!(source.call_offsets(), vec![0, 60, 120]);
    assert_eq!(stats.delivered, 3);
    assert_eq!(stats.cycles, 3);
    assert!(stats.last_delivered_at.is_some());
    assert_eq!(
        *sender.sent.lock().unwrap(),
        vec!["Bitcoin: 2,345,000,000 Toman".to_string(); 3]
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_and_error_reports_are_suppressed() {
    let source = ScriptedSource::new(
        vec![
            Step::Report(FormattedReport::Empty),
            Step::Report(FormattedReport::error("connection: 503")),
        ],
        bitcoin_report(),
    );
    let sender = Arc::new(RecordingSender::default());

    let stats = run_for(source.clone(), sender.clone(), Duration::from_secs(150)).await;

    // 에러 리포트는 사이클 단위 실패이므로 일반 주기로 대기
    assert_eq!(source.call_offsets(), vec![0, 60, 120]);
    assert_eq!(stats.suppressed_empty, 1);
    assert_eq!(stats.suppressed_error, 1);
    assert_eq!(stats.delivered, 1);
    assert_eq!(sender.sent.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_send_failure_keeps_schedule() {
    let source = ScriptedSource::always(bitcoin_report());
    let sender = Arc::new(RecordingSender {
        unauthorized: true,
        ..Default::default()
    });

    let stats = run_for(source.clone(), sender, Duration::from_secs(90)).await;

    assert_eq!(source.call_offsets(), vec![0, 60]);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.systemic_failures, 0);
}

#[tokio::test(start_paused = true)]
async fn test_panic_extends_wait_then_recovers() {
    let source = ScriptedSource::new(vec![Step::Panic], bitcoin_report());
    let sender = Arc::new(RecordingSender::default());

    let stats = run_for(source.clone(), sender.clone(), Duration::from_secs(400)).await;

    assert_eq!(source.call_offsets(), vec![0, 300, 360]);
    assert_eq!(stats.systemic_failures, 1);
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.cycles, 3);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_interrupts_in_flight_cycle() {
    let source = ScriptedSource::new(vec![Step::Hang], bitcoin_report());
    let sender = Arc::new(RecordingSender::default());

    let started = Instant::now();
    let stats = run_for(source.clone(), sender.clone(), Duration::from_secs(5)).await;

    assert!(started.elapsed() < Duration::from_secs(60));
    assert_eq!(source.call_offsets(), vec![0]);
    assert_eq!(stats, CycleStats::default());
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_before_start() {
    let source = ScriptedSource::always(bitcoin_report());
    let sender = Arc::new(RecordingSender::default());

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let stats = Scheduler::new(source.clone(), sender, schedule())
        .run(shutdown)
        .await;

    assert_eq!(stats.cycles, 0);
    assert!(source.call_offsets().is_empty());
}
