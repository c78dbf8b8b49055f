#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use fatsecret_relay::{
    AppState,
    cache::{ClientCredentials, Clock, TokenCache},
    config::Config,
    routes,
};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TOKEN_PATH: &str = "/connect/token";
pub const API_PATH: &str = "/rest/server.api";
pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
// base64("client-id:client-secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

/// 可手动推进的时钟
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    pub fn advance(&self, secs: i64) {
        *self.now.lock().unwrap() += Duration::seconds(secs);
    }

    pub fn as_clock(&self) -> Clock {
        let now = Arc::clone(&self.now);
        Arc::new(move || *now.lock().unwrap())
    }
}

pub fn test_config(server: &MockServer) -> Config {
    Config {
        client_id: CLIENT_ID.into(),
        client_secret: CLIENT_SECRET.into(),
        server_host: "127.0.0.1".into(),
        server_port: 0,
        token_url: server.url(TOKEN_PATH),
        api_url: server.url(API_PATH),
        region: "MX".into(),
    }
}

pub fn token_cache(server: &MockServer, clock: &ManualClock) -> TokenCache {
    TokenCache::new(
        reqwest::Client::new(),
        ClientCredentials {
            client_id: CLIENT_ID.into(),
            client_secret: CLIENT_SECRET.into(),
        },
        server.url(TOKEN_PATH),
    )
    .with_clock(clock.as_clock())
}

pub fn app_state(config: Config, clock: &ManualClock) -> AppState {
    let http = reqwest::Client::new();
    let tokens = TokenCache::new(
        http.clone(),
        ClientCredentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        },
        config.token_url.clone(),
    )
    .with_clock(clock.as_clock());
    AppState::with_token_cache(config, http, Arc::new(tokens))
}

pub fn app(state: AppState) -> Router {
    routes::create_router(state)
}

/// 成功的令牌端点
pub async fn mock_token<'a>(server: &'a MockServer, token: &str, expires_in: i64) -> Mock<'a> {
    let body = json!({
        "access_token": token,
        "expires_in": expires_in,
        "token_type": "Bearer",
    });
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .header("authorization", BASIC_AUTH)
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("grant_type=client_credentials")
                .body_contains("scope=basic");
            then.status(200).json_body(body);
        })
        .await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, raw) = get_raw(app, uri).await;
    let body = if raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&raw).unwrap()
    };
    (status, body)
}

/// 返回状态码、content-type 和原始响应体
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}
