//! 시세 API 연결 및 리포트 생성.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `RetryClient`: 지수 백오프 재시도가 포함된 HTTP 클라이언트
//! - `BitpinProvider`: Bitpin 시세 조회 및 리포트 렌더링
//! - `PriceSource` trait: 스케줄러가 사용하는 시세 소스 인터페이스

pub mod error;
pub mod format;
pub mod provider;
pub mod retry;
pub mod traits;

pub use error::*;
pub use format::{format_price, group_thousands};
pub use provider::BitpinProvider;
pub use retry::RetryClient;
pub use traits::PriceSource;
