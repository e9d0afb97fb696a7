//! # Pricebot Core
//!
//! 시세 알림 봇의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 다른 크레이트 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목 필터 및 시세 레코드
//! - 사이클 리포트 / 결과 타입
//! - 재시도 정책
//! - 환경변수 기반 설정
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
