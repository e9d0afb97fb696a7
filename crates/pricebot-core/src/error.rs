//! 설정 에러 타입.

use thiserror::Error;

/// 설정 로드/검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 필수 환경변수 누락
    #[error("필수 환경변수 {0}가 설정되지 않았습니다")]
    MissingEnv(&'static str),

    /// 잘못된 값
    #[error("잘못된 설정 {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// 설정 작업을 위한 Result 타입.
pub type ConfigResult<T> = Result<T, ConfigError>;
