//! 재시도 로직이 포함된 HTTP 클라이언트.

use pricebot_core::RetryPolicy;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ConnectionErrorKind, ExchangeResult, FailureCause, TransportError};

/// 지수 백오프로 GET 요청을 재시도하는 HTTP 클라이언트.
///
/// 호출 사이에 공유되는 가변 상태가 없습니다.
#[derive(Debug, Clone)]
pub struct RetryClient {
    client: Client,
    policy: RetryPolicy,
}

impl RetryClient {
    /// 시도당 타임아웃을 가진 클라이언트를 생성합니다.
    pub fn new(policy: RetryPolicy, timeout: Duration) -> ExchangeResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, policy })
    }

    /// GET 요청을 보내고 응답 본문을 반환합니다.
    ///
    /// 재시도 대상 상태 코드나 연결 실패 시 `backoff_base * 2^(attempt-1)` 대기 후
    /// 최대 `max_attempts`회까지 시도합니다. 그 외의 4xx/5xx는 즉시 실패합니다.
    pub async fn get(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, TransportError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let cause = match self.client.get(url).headers(headers.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.bytes().await {
                            Ok(body) => {
                                debug!(url, attempt, bytes = body.len(), "HTTP 요청 성공");
                                return Ok(body.to_vec());
                            }
                            Err(e) => FailureCause::Connection(ConnectionErrorKind::from(&e)),
                        }
                    } else if self.policy.is_retryable_status(status.as_u16()) {
                        FailureCause::Status(status.as_u16())
                    } else {
                        return Err(TransportError {
                            cause: FailureCause::Status(status.as_u16()),
                            attempts: attempt,
                        });
                    }
                }
                Err(e) if e.is_builder() => {
                    return Err(TransportError {
                        cause: FailureCause::Connection(ConnectionErrorKind::Request),
                        attempts: attempt,
                    });
                }
                Err(e) => FailureCause::Connection(ConnectionErrorKind::from(&e)),
            };

            if attempt >= max_attempts {
                return Err(TransportError {
                    cause,
                    attempts: attempt,
                });
            }

            let delay = self.policy.delay_for_attempt(attempt);
            warn!(
                url,
                attempt,
                max_attempts,
                cause = %cause,
                delay_ms = delay.as_millis() as u64,
                "HTTP 요청 실패, 재시도"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
