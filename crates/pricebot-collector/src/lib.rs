//! Standalone price poller.
//!
//! 주기적으로 시세를 조회하여 텔레그램 채널에 전송하는 데몬을 제공합니다:
//! - 전송 게이트 (빈 리포트/에러 리포트 억제)
//! - 단일 사이클 실행 (조회 → 게이트 → 전송)
//! - 스케줄러 루프 (일반 주기 / 시스템 장애 후 연장 주기)

pub mod cycle;
pub mod error;
pub mod gate;
pub mod scheduler;
pub mod stats;

pub use cycle::run_cycle;
pub use error::{CollectorError, Result};
pub use gate::{should_deliver, suppression_reason};
pub use scheduler::{Scheduler, SchedulerState};
pub use stats::CycleStats;
