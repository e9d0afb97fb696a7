//! 종목 필터 및 원시 시세 타입.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ConfigError;

/// 알림 대상 종목 목록.
///
/// 거래소 심볼 → 표시 이름 매핑. 시작 시 한 번 만들어지고 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentFilter {
    names: HashMap<String, String>,
}

impl InstrumentFilter {
    /// (심볼, 표시 이름) 쌍으로 필터를 생성합니다.
    ///
    /// 같은 심볼이 여러 번 나오면 마지막 값이 사용됩니다.
    pub fn new<I, S, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(symbol, name)| (symbol.into(), name.into()))
                .collect(),
        }
    }

    /// 심볼의 표시 이름을 반환합니다.
    pub fn display_name(&self, symbol: &str) -> Option<&str> {
        self.names.get(symbol).map(String::as_str)
    }

    /// 심볼이 필터에 포함되는지 확인합니다.
    pub fn contains(&self, symbol: &str) -> bool {
        self.names.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for InstrumentFilter {
    fn default() -> Self {
        Self::new([("BTC", "بیتکوین"), ("ETH", "اتریوم"), ("USDT", "تتر")])
    }
}

impl FromStr for InstrumentFilter {
    type Err = ConfigError;

    /// `"BTC=Bitcoin,ETH=Ethereum"` 형식을 파싱합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();

        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (symbol, name) = item.split_once('=').ok_or_else(|| {
                ConfigError::invalid("INSTRUMENTS", format!("'{}'에 '='가 없습니다", item))
            })?;
            let (symbol, name) = (symbol.trim(), name.trim());
            if symbol.is_empty() || name.is_empty() {
                return Err(ConfigError::invalid(
                    "INSTRUMENTS",
                    format!("'{}'의 심볼 또는 이름이 비어 있습니다", item),
                ));
            }
            entries.push((symbol.to_uppercase(), name.to_string()));
        }

        if entries.is_empty() {
            return Err(ConfigError::invalid("INSTRUMENTS", "종목이 하나도 없습니다"));
        }

        Ok(Self::new(entries))
    }
}

/// API 응답의 시세 레코드 하나.
///
/// 한 사이클 동안만 존재합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuote {
    /// 거래소 심볼 (예: "BTC")
    pub symbol: String,
    /// 가격 원문 (예: "45000000.7")
    pub price: String,
}

impl RawQuote {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }

    /// 가격을 Decimal로 파싱합니다. 지수 표기(`4.5e7`)도 허용합니다.
    pub fn parse_price(&self) -> Option<Decimal> {
        let raw = self.price.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    }
}
