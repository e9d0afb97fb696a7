//! 시세 조회 에러 타입.

use std::fmt;
use thiserror::Error;

/// 연결 수준 실패 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionErrorKind {
    /// 연결 실패 (거부, DNS 등)
    Connect,
    /// 시도당 타임아웃 초과
    Timeout,
    /// 응답 본문 수신 실패
    Body,
    /// 기타 요청 실패
    Request,
}

impl fmt::Display for ConnectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Body => "body",
            Self::Request => "request",
        };
        f.write_str(name)
    }
}

impl From<&reqwest::Error> for ConnectionErrorKind {
    fn from(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect
        } else if err.is_body() || err.is_decode() {
            Self::Body
        } else {
            Self::Request
        }
    }
}

/// 마지막 실패 원인.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// 2xx가 아닌 상태 코드
    Status(u16),
    /// 연결 수준 실패
    Connection(ConnectionErrorKind),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "{}", status),
            Self::Connection(kind) => write!(f, "{}", kind),
        }
    }
}

/// 재시도를 모두 소진했거나 재시도 불가능한 실패.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP 요청 실패: {cause} (시도 {attempts}회)")]
pub struct TransportError {
    /// 마지막 실패 원인
    pub cause: FailureCause,
    /// 수행한 시도 횟수
    pub attempts: u32,
}

/// 응답 본문 파싱 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// JSON이 아님
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// `results` 목록 없음
    #[error("missing results list")]
    MissingResults,
}

/// 프로바이더 생성 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// HTTP 클라이언트 생성 실패
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// 잘못된 인증 헤더 값
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// 프로바이더 작업용 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_cause_display() {
        assert_eq!(FailureCause::Status(503).to_string(), "503");
        assert_eq!(
            FailureCause::Connection(ConnectionErrorKind::Timeout).to_string(),
            "timeout"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError {
            cause: FailureCause::Status(502),
            attempts: 5,
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains('5'));
    }
}
