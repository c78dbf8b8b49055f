use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};
use serde_json::Value;

use crate::AppState;
use crate::error::AppError;

use super::model::SearchQuery;

#[axum::debug_handler]
pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    let query = SearchQuery::from_pairs(pairs);
    let term = query.term().ok_or(AppError::MissingQuery)?;

    state.fatsecret.search(term).await.map(Json).map_err(|e| {
        tracing::error!("Error searching foods for {:?}: {}", term, e);
        AppError::SearchFailed
    })
}

#[axum::debug_handler]
pub async fn food_detail(
    State(state): State<AppState>,
    food_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let Path(food_id) = food_id.map_err(|e| {
        tracing::warn!("Rejected food id: {}", e);
        AppError::InvalidFoodId
    })?;

    state
        .fatsecret
        .food_detail(&food_id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error fetching food {}: {}", food_id, e);
            AppError::DetailFailed
        })
}
