use std::sync::Arc;

use config::Config;
use reqwest::Client;

use cache::{ClientCredentials, TokenCache};
use infrastructure::FatSecretClient;

pub mod cache;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod middleware;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub fatsecret: Arc<FatSecretClient>,
}

impl AppState {
    /// 用同一个 HTTP 客户端构建令牌缓存和 FatSecret 客户端
    pub fn from_config(config: Config) -> Self {
        let http = Client::new();
        let tokens = TokenCache::new(
            http.clone(),
            ClientCredentials {
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.clone(),
            },
            config.token_url.clone(),
        );
        Self::with_token_cache(config, http, Arc::new(tokens))
    }

    pub fn with_token_cache(config: Config, http: Client, tokens: Arc<TokenCache>) -> Self {
        let fatsecret = FatSecretClient::new(
            http,
            tokens,
            config.api_url.clone(),
            config.region.clone(),
        );
        Self {
            config,
            fatsecret: Arc::new(fatsecret),
        }
    }
}
