//! Bitpin 시세 프로바이더.
//!
//! `GET /api/v1/market/currencies/` 응답에서 설정된 종목만 골라
//! `"<표시 이름>: <정수 가격> <통화 단위>"` 형식의 줄로 렌더링합니다.

use async_trait::async_trait;
use pricebot_core::{AppConfig, FormattedReport, InstrumentFilter, MarketSettings, RawQuote, RetryPolicy};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{ExchangeError, ExchangeResult, ParseError};
use crate::format::format_price;
use crate::retry::RetryClient;
use crate::traits::PriceSource;

/// Bitpin 시세 프로바이더.
#[derive(Debug, Clone)]
pub struct BitpinProvider {
    client: RetryClient,
    endpoint: String,
    headers: HeaderMap,
    filter: InstrumentFilter,
    currency_unit: String,
}

impl BitpinProvider {
    /// 새 프로바이더를 생성합니다.
    ///
    /// 토큰이 헤더 값으로 쓸 수 없는 문자를 포함하면 실패합니다.
    pub fn new(
        market: &MarketSettings,
        retry: RetryPolicy,
        filter: InstrumentFilter,
    ) -> ExchangeResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", market.api_token.expose_secret()))
            .map_err(|e| ExchangeError::InvalidHeader(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            client: RetryClient::new(retry, market.request_timeout)?,
            endpoint: market.endpoint.clone(),
            headers,
            filter,
            currency_unit: market.currency_unit.clone(),
        })
    }

    /// 전체 설정에서 프로바이더를 생성합니다.
    pub fn from_config(config: &AppConfig) -> ExchangeResult<Self> {
        Self::new(&config.market, config.retry.clone(), config.instruments.clone())
    }

    /// 시세를 조회하여 리포트를 생성합니다.
    pub async fn fetch_report(&self) -> FormattedReport {
        let body = match self.client.get(&self.endpoint, &self.headers).await {
            Ok(body) => body,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "시세 조회 실패");
                return FormattedReport::error(format!("connection: {}", e.cause));
            }
        };

        match parse_quotes(&body) {
            Ok(quotes) => render_report(&quotes, &self.filter, &self.currency_unit),
            Err(e) => {
                warn!(error = %e, "시세 응답 파싱 실패");
                FormattedReport::error(format!("parse: {}", e))
            }
        }
    }
}

#[async_trait]
impl PriceSource for BitpinProvider {
    async fn fetch_report(&self) -> FormattedReport {
        BitpinProvider::fetch_report(self).await
    }

    fn name(&self) -> &str {
        "bitpin"
    }
}

/// 응답 본문을 시세 레코드 목록으로 파싱합니다.
///
/// `code`/`price`가 없거나 형식이 맞지 않는 항목은 건너뜁니다.
pub fn parse_quotes(body: &[u8]) -> Result<Vec<RawQuote>, ParseError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let results = value
        .get("results")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingResults)?;

    let quotes: Vec<RawQuote> = results.iter().filter_map(quote_from_entry).collect();

    if quotes.len() < results.len() {
        debug!(
            total = results.len(),
            skipped = results.len() - quotes.len(),
            "형식이 맞지 않는 시세 항목 건너뜀"
        );
    }

    Ok(quotes)
}

fn quote_from_entry(entry: &Value) -> Option<RawQuote> {
    let symbol = entry.get("code")?.as_str()?;
    let price = match entry.get("price")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(RawQuote::new(symbol, price))
}

/// 필터에 포함된 종목만 원본 순서대로 렌더링합니다.
///
/// 같은 심볼은 처음 나온 것만 사용합니다. 줄이 없으면 `Empty`.
pub fn render_report(
    quotes: &[RawQuote],
    filter: &InstrumentFilter,
    currency_unit: &str,
) -> FormattedReport {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for quote in quotes {
        let Some(name) = filter.display_name(&quote.symbol) else {
            continue;
        };
        if seen.contains(quote.symbol.as_str()) {
            continue;
        }
        let Some(price) = quote.parse_price().and_then(format_price) else {
            debug!(symbol = %quote.symbol, price = %quote.price, "가격 형식 오류, 건너뜀");
            continue;
        };

        seen.insert(quote.symbol.as_str());
        lines.push(format!("{}: {} {}", name, price, currency_unit));
    }

    FormattedReport::from_lines(lines)
}
