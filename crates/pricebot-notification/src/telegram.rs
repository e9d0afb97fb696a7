//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API를 통해 시세 리포트를 채널에 전송합니다.

use async_trait::async_trait;
use pricebot_core::TelegramSettings;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::types::{NotificationError, NotificationResult, NotificationSender};

/// 텔레그램 알림 전송 설정.
#[derive(Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: SecretString,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// Bot API 기본 URL
    pub api_url: String,
    /// 파싱 모드 (HTML 또는 MarkdownV2), 없으면 일반 텍스트
    pub parse_mode: Option<String>,
    /// 요청 타임아웃
    pub timeout: Duration,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"***REDACTED***")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .field("parse_mode", &self.parse_mode)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: SecretString, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token,
            chat_id: chat_id.into(),
            api_url: pricebot_core::DEFAULT_TELEGRAM_API_URL.to_string(),
            parse_mode: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Bot API 기본 URL을 설정합니다.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// 파싱 모드를 설정합니다.
    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = Some(parse_mode.into());
        self
    }
}

impl From<&TelegramSettings> for TelegramConfig {
    fn from(settings: &TelegramSettings) -> Self {
        Self::new(settings.bot_token.clone(), settings.chat_id.clone())
            .with_api_url(settings.api_url.clone())
    }
}

/// Bot API 에러 응답.
#[derive(Debug, Deserialize)]
struct TelegramErrorResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> NotificationResult<Self> {
        if config.bot_token.expose_secret().is_empty() || config.chat_id.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "봇 토큰과 채팅 ID가 필요합니다".to_string(),
            ));
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// 지정한 채팅으로 메시지를 전송합니다.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> NotificationResult<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token.expose_secret()
        );

        let mut params = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        if let Some(parse_mode) = &self.config.parse_mode {
            params["parse_mode"] = serde_json::Value::String(parse_mode.clone());
        }

        debug!(chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            // URL에 토큰이 들어 있으므로 에러 메시지에서 제거
            .map_err(|e| NotificationError::NetworkError(e.without_url()))?;

        let status = response.status();
        if status.is_success() {
            info!(chat_id, "Telegram notification sent successfully");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<TelegramErrorResponse>(&body).ok();
        let description = parsed
            .as_ref()
            .and_then(|r| r.description.clone())
            .unwrap_or_else(|| body.clone());

        let err = match status.as_u16() {
            401 | 403 => NotificationError::Unauthorized(description),
            429 => {
                let retry_after = parsed
                    .and_then(|r| r.parameters)
                    .and_then(|p| p.retry_after)
                    .unwrap_or(60);
                warn!(retry_after, "Telegram rate limited");
                return Err(NotificationError::RateLimited(retry_after));
            }
            400 if description.to_lowercase().contains("chat not found") => {
                NotificationError::ChatNotFound(chat_id.to_string())
            }
            _ => NotificationError::SendFailed(format!("HTTP {}: {}", status, description)),
        };

        error!(chat_id, status = status.as_u16(), error = %err, "Failed to send Telegram message");
        Err(err)
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, text: &str) -> NotificationResult<()> {
        self.send_message(&self.config.chat_id, text).await
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_chat_id() {
        let config = TelegramConfig::new(SecretString::new("token".into()), "");
        assert!(matches!(
            TelegramSender::new(config),
            Err(NotificationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TelegramConfig::new(SecretString::new("123:secret".into()), "@chan")
            .with_parse_mode("HTML");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("123:secret"));
        assert!(debug.contains("@chan"));
    }
}
