//! 스케줄러 루프.
//!
//! 사이클을 순차적으로 실행하고 결과에 따라 대기 시간을 고릅니다:
//! - 일반 사이클 (전송/억제/전송 실패): `interval`
//! - 사이클 도중 패닉 (시스템 장애): `failure_interval`
//!
//! CancellationToken을 통해 사이클 진행 중이나 대기 중에도 즉시 종료됩니다.

use futures::FutureExt;
use pricebot_core::{AppConfig, ScheduleSettings};
use pricebot_exchange::{BitpinProvider, PriceSource};
use pricebot_notification::{NotificationSender, TelegramConfig, TelegramSender};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::cycle::run_cycle;
use crate::error::Result;
use crate::stats::CycleStats;

/// 스케줄러 상태. 로그 필드로 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Fetching,
    Gating,
    Delivering,
    Skipping,
    Sleeping(Duration),
}

/// 시세 조회 → 전송 사이클을 주기적으로 실행하는 스케줄러.
pub struct Scheduler {
    source: Arc<dyn PriceSource>,
    sender: Arc<dyn NotificationSender>,
    schedule: ScheduleSettings,
    stats: CycleStats,
}

impl Scheduler {
    /// 새 스케줄러 생성.
    pub fn new(
        source: Arc<dyn PriceSource>,
        sender: Arc<dyn NotificationSender>,
        schedule: ScheduleSettings,
    ) -> Self {
        Self {
            source,
            sender,
            schedule,
            stats: CycleStats::new(),
        }
    }

    /// 설정으로 Bitpin 소스와 텔레그램 전송기를 만들어 스케줄러를 생성합니다.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = BitpinProvider::from_config(config)?;
        let sender = TelegramSender::new(TelegramConfig::from(&config.telegram))?;
        Ok(Self::new(Arc::new(source), Arc::new(sender), config.schedule))
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// 종료 신호가 올 때까지 사이클을 실행하고 통계를 반환합니다.
    pub async fn run(mut self, shutdown: CancellationToken) -> CycleStats {
        info!(
            source = self.source.name(),
            sender = self.sender.name(),
            interval_secs = self.schedule.interval.as_secs(),
            failure_interval_secs = self.schedule.failure_interval.as_secs(),
            "스케줄러 시작"
        );

        loop {
            debug!(state = ?SchedulerState::Idle);

            let cycle =
                AssertUnwindSafe(run_cycle(self.source.as_ref(), self.sender.as_ref())).catch_unwind();

            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                result = cycle => result,
            };

            let wait = match result {
                Ok(outcome) => {
                    outcome.log();
                    self.stats.record(&outcome);
                    self.schedule.interval
                }
                Err(panic) => {
                    error!(
                        panic = %panic_message(panic.as_ref()),
                        wait_secs = self.schedule.failure_interval.as_secs(),
                        "사이클 중 처리되지 않은 실패, 대기 시간 연장"
                    );
                    self.stats.record_systemic_failure();
                    self.schedule.failure_interval
                }
            };

            debug!(state = ?SchedulerState::Sleeping(wait));
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        info!("종료 신호 수신, 스케줄러 종료");
        self.stats
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
