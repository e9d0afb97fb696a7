//! 에러 타입 정의.

use pricebot_core::ConfigError;
use pricebot_exchange::ExchangeError;
use pricebot_notification::NotificationError;
use thiserror::Error;

/// Collector 시작 단계 에러.
///
/// 사이클 실행 중의 실패는 `CycleOutcome`으로 표현되며 여기에 포함되지 않습니다.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 시세 프로바이더 생성 에러
    #[error("Price source error: {0}")]
    Exchange(#[from] ExchangeError),

    /// 알림 전송기 생성 에러
    #[error("Notifier error: {0}")]
    Notification(#[from] NotificationError),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
