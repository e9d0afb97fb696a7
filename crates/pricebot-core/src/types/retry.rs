//! HTTP 재시도 정책.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::ConfigError;

/// 재시도 가능한 기본 상태 코드.
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// 지수 백오프 재시도 정책.
///
/// 시도 `k` 이후 다음 시도 전까지 `backoff_base * 2^(k-1)` 만큼 대기합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    retryable_statuses: BTreeSet<u16>,
}

impl RetryPolicy {
    /// 새 정책을 생성합니다.
    ///
    /// `max_attempts >= 1`, `backoff_base > 0` 이어야 합니다.
    pub fn new(
        max_attempts: u32,
        backoff_base: Duration,
        retryable_statuses: impl IntoIterator<Item = u16>,
    ) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::invalid(
                "RETRY_MAX_ATTEMPTS",
                "1 이상이어야 합니다",
            ));
        }
        if backoff_base.is_zero() {
            return Err(ConfigError::invalid(
                "RETRY_BACKOFF_MS",
                "0보다 커야 합니다",
            ));
        }

        Ok(Self {
            max_attempts,
            backoff_base,
            retryable_statuses: retryable_statuses.into_iter().collect(),
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub fn retryable_statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.retryable_statuses.iter().copied()
    }

    /// 상태 코드가 재시도 대상인지 확인합니다.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// `attempt`번째 시도(1부터) 실패 후 대기 시간.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.backoff_base.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_base: Duration::from_secs(1),
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.into_iter().collect(),
        }
    }
}
