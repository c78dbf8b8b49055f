use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};

use crate::cache::models::token::{CachedToken, TokenResponse};
use crate::error::AuthError;

/// 当前时间来源，测试中可替换
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// OAuth client-credentials 凭据
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// 进程内共享的 bearer 令牌缓存。
///
/// 有效令牌直接返回；过期或缺失时执行一次 client-credentials 交换。
/// 刷新由 `refresh` 互斥锁串行化，并发请求在锁内重新检查缓存，
/// 因此同一时刻最多只有一次交换在进行。
pub struct TokenCache {
    http: Client,
    credentials: ClientCredentials,
    token_url: String,
    clock: Clock,
    current: RwLock<Option<CachedToken>>,
    refresh: Mutex<()>,
}

impl TokenCache {
    pub fn new(http: Client, credentials: ClientCredentials, token_url: impl Into<String>) -> Self {
        Self {
            http,
            credentials,
            token_url: token_url.into(),
            clock: Arc::new(Utc::now),
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// 当前缓存内容的快照
    pub async fn cached(&self) -> Option<CachedToken> {
        self.current.read().await.clone()
    }

    /// 返回有效令牌，必要时刷新
    pub async fn get_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.valid_token().await {
            return Ok(token);
        }

        let _refreshing = self.refresh.lock().await;

        // 等锁期间可能已被其他请求刷新
        if let Some(token) = self.valid_token().await {
            return Ok(token);
        }

        let now = (self.clock)();
        let response = self.exchange().await?;

        let Some(expires_in) = response.expires_in_secs() else {
            tracing::warn!("Token response has no usable expires_in, token will not be cached");
            return Ok(response.access_token);
        };

        match CachedToken::issue(response.access_token.clone(), expires_in, now) {
            Some(token) => {
                tracing::info!("New FatSecret token issued, valid until {}", token.expires_at);
                tracing::debug!("Token prefix: {}...", token.preview());
                *self.current.write().await = Some(token);
            }
            None => {
                tracing::warn!(
                    "Token lifetime of {}s leaves no window after the safety margin, not caching",
                    expires_in
                );
            }
        }

        Ok(response.access_token)
    }

    async fn valid_token(&self) -> Option<String> {
        let now = (self.clock)();
        self.current
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.value.clone())
    }

    async fn exchange(&self) -> Result<TokenResponse, AuthError> {
        tracing::debug!("Requesting FatSecret token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials"), ("scope", "basic")])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error obtaining token: {}", e);
                AuthError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!("Error obtaining token ({}): {}", status, body);
            return Err(AuthError::Rejected { status, body });
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            AuthError::InvalidResponse(e.to_string())
        })
    }
}
