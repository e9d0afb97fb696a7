//! 환경변수 기반 설정 모듈.
//!
//! 시작 시 한 번 로드되어 각 컴포넌트에 참조로 전달됩니다.

use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{InstrumentFilter, RetryPolicy, DEFAULT_RETRYABLE_STATUSES};

/// Bitpin 시세 API 기본 URL
pub const DEFAULT_MARKET_API_URL: &str = "https://api.bitpin.ir/api/v1/market/currencies/";
/// Telegram Bot API 기본 URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
/// 기본 통화 단위
pub const DEFAULT_CURRENCY_UNIT: &str = "تومان";

/// 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 텔레그램 설정
    pub telegram: TelegramSettings,
    /// 시세 API 설정
    pub market: MarketSettings,
    /// HTTP 재시도 정책
    pub retry: RetryPolicy,
    /// 스케줄 설정
    pub schedule: ScheduleSettings,
    /// 알림 대상 종목
    pub instruments: InstrumentFilter,
}

/// 텔레그램 설정
#[derive(Clone)]
pub struct TelegramSettings {
    /// 봇 토큰
    pub bot_token: SecretString,
    /// 메시지를 보낼 채널 ID
    pub chat_id: String,
    /// Bot API 기본 URL
    pub api_url: String,
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"***REDACTED***")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// 시세 API 설정
#[derive(Clone)]
pub struct MarketSettings {
    /// Bearer 토큰
    pub api_token: SecretString,
    /// 시세 엔드포인트
    pub endpoint: String,
    /// 시도당 요청 타임아웃
    pub request_timeout: Duration,
    /// 가격 뒤에 붙는 통화 단위
    pub currency_unit: String,
}

impl fmt::Debug for MarketSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketSettings")
            .field("api_token", &"***REDACTED***")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("currency_unit", &self.currency_unit)
            .finish()
    }
}

/// 스케줄 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSettings {
    /// 일반 사이클 주기
    pub interval: Duration,
    /// 시스템 장애 후 대기 시간
    pub failure_interval: Duration,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            failure_interval: Duration::from_secs(300),
        }
    }
}

impl AppConfig {
    /// 환경변수에서 설정 로드 (`.env` 파일이 있으면 먼저 읽습니다)
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 조회 함수로 설정을 로드합니다.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };

        let telegram = TelegramSettings {
            bot_token: SecretString::new(env.required("TELEGRAM_TOKEN")?.into()),
            chat_id: env.required("CHANNEL_ID")?,
            api_url: env.string_or("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
        };

        let market = MarketSettings {
            api_token: SecretString::new(env.required("BITPIN_API_TOKEN")?.into()),
            endpoint: env.string_or("MARKET_API_URL", DEFAULT_MARKET_API_URL),
            request_timeout: env.secs_or("REQUEST_TIMEOUT_SECS", 10)?,
            currency_unit: env.string_or("CURRENCY_UNIT", DEFAULT_CURRENCY_UNIT),
        };

        let retry = RetryPolicy::new(
            env.parse_or("RETRY_MAX_ATTEMPTS", 5)?,
            Duration::from_millis(env.parse_or("RETRY_BACKOFF_MS", 1000)?),
            env.statuses_or("RETRY_STATUSES", &DEFAULT_RETRYABLE_STATUSES)?,
        )?;

        let schedule = ScheduleSettings {
            interval: env.secs_or("POLL_INTERVAL_SECS", 60)?,
            failure_interval: env.secs_or("FAILURE_INTERVAL_SECS", 300)?,
        };

        let instruments = match env.optional("INSTRUMENTS") {
            Some(raw) => raw.parse()?,
            None => InstrumentFilter::default(),
        };

        Ok(Self {
            telegram,
            market,
            retry,
            schedule,
            instruments,
        })
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// 비어 있는 값은 없는 것으로 취급합니다.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> ConfigResult<String> {
        self.optional(key).ok_or(ConfigError::MissingEnv(key))
    }

    fn string_or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(key, format!("'{}': {}", raw, e))),
            None => Ok(default),
        }
    }

    /// 초 단위 기간. 0은 허용하지 않습니다.
    fn secs_or(&self, key: &'static str, default: u64) -> ConfigResult<Duration> {
        match self.parse_or(key, default)? {
            0 => Err(ConfigError::invalid(key, "0보다 커야 합니다")),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    fn statuses_or(&self, key: &'static str, default: &[u16]) -> ConfigResult<Vec<u16>> {
        match self.optional(key) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u16>()
                        .map_err(|e| ConfigError::invalid(key, format!("'{}': {}", s, e)))
                })
                .collect(),
            None => Ok(default.to_vec()),
        }
    }
}
