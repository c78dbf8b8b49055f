use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::AppState;
use crate::middleware::log_requests;

pub mod fatsecret;

pub const API_BASE_URI: &str = "/api/fatsecret";

/// FatSecret 代理路由
pub fn fatsecret_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(fatsecret::search))
        .route("/food/{id}", get(fatsecret::food_detail))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    // 允许所有来源，部署时应收紧
    let cors = CorsLayer::permissive();

    Router::new()
        .nest(API_BASE_URI, fatsecret_routes())
        .layer(axum::middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}
