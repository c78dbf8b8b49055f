use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;

use crate::cache::TokenCache;
use crate::error::UpstreamError;

/// FatSecret REST 客户端，令牌由共享的 `TokenCache` 提供
pub struct FatSecretClient {
    http: Client,
    tokens: Arc<TokenCache>,
    api_url: String,
    region: String,
}

impl FatSecretClient {
    pub fn new(
        http: Client,
        tokens: Arc<TokenCache>,
        api_url: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            http,
            tokens,
            api_url: api_url.into(),
            region: region.into(),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenCache> {
        &self.tokens
    }

    /// `foods.search`
    pub async fn search(&self, term: &str) -> Result<Value, UpstreamError> {
        self.call(&[
            ("method", "foods.search"),
            ("search_expression", term),
            ("format", "json"),
            ("region", self.region.as_str()),
            ("flag_default_serving", "true"),
        ])
        .await
    }

    /// `food.get.v2`
    pub async fn food_detail(&self, food_id: &str) -> Result<Value, UpstreamError> {
        self.call(&[
            ("method", "food.get.v2"),
            ("food_id", food_id),
            ("format", "json"),
        ])
        .await
    }

    async fn call(&self, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let token = self.tokens.get_token().await?;

        let response = self
            .http
            .get(&self.api_url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(UpstreamError::Status { status, body });
        }

        response.json::<Value>().await.map_err(UpstreamError::InvalidBody)
    }
}
