use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;

/// 从上游报告的有效期中扣除的安全余量（秒）
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// 缓存中的 bearer 令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// 按 `now + expires_in - 60s` 计算过期时间。
    ///
    /// 扣除余量后没有剩余窗口时返回 `None`，此时令牌不应缓存。
    pub fn issue(value: String, expires_in_secs: i64, now: DateTime<Utc>) -> Option<Self> {
        let lifetime = expires_in_secs.checked_sub(TOKEN_EXPIRY_MARGIN_SECS)?;
        if lifetime <= 0 {
            return None;
        }

        let expires_at = now.checked_add_signed(Duration::try_seconds(lifetime)?)?;
        Some(Self { value, expires_at })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// 日志用的令牌前缀
    pub fn preview(&self) -> &str {
        let end = self
            .value
            .char_indices()
            .nth(8)
            .map_or(self.value.len(), |(index, _)| index);
        &self.value[..end]
    }
}

/// OAuth 令牌端点的响应
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<Value>,
}

impl TokenResponse {
    /// `expires_in` 可能是整数、小数或数字字符串，小数部分截断
    pub fn expires_in_secs(&self) -> Option<i64> {
        match self.expires_in.as_ref()? {
            Value::Number(number) => number.as_i64().or_else(|| whole_secs(number.as_f64()?)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| whole_secs(text.parse::<f64>().ok()?))
            }
            _ => None,
        }
    }
}

fn whole_secs(secs: f64) -> Option<i64> {
    // 超出 i64 范围的值不可用
    (secs.is_finite() && secs.abs() < i64::MAX as f64).then(|| secs.trunc() as i64)
}
