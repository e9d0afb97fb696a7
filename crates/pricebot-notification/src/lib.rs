//! # Pricebot Notification
//!
//! 시세 리포트 전송 서비스.
//!
//! 지원 채널:
//! - Telegram (Bot API `sendMessage`)

pub mod telegram;
pub mod types;

pub use telegram::*;
pub use types::*;
