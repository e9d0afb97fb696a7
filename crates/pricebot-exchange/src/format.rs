//! 가격 포맷팅.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 정수를 세 자리마다 쉼표로 구분합니다.
pub fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// 가격을 소수점 이하 버림 후 천 단위 구분 문자열로 변환합니다.
///
/// 음수 가격은 `None`.
pub fn format_price(price: Decimal) -> Option<String> {
    let truncated = price.trunc();
    if truncated.is_sign_negative() && !truncated.is_zero() {
        return None;
    }
    truncated.abs().to_u128().map(group_thousands)
}
