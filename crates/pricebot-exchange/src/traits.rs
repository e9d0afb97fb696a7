//! 시세 소스 trait.

use async_trait::async_trait;
use pricebot_core::FormattedReport;

/// 한 사이클의 시세 리포트를 만들어내는 소스.
///
/// 실패는 `FormattedReport::Error`로 표현되며 에러를 반환하지 않습니다.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// 시세를 조회하여 리포트를 생성합니다.
    async fn fetch_report(&self) -> FormattedReport;

    /// 소스 이름을 반환합니다.
    fn name(&self) -> &str;
}
