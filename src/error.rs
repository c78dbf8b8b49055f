use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::StatusCode as UpstreamStatus;
use serde::Serialize;
use thiserror::Error;

/// 令牌交换失败
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("token endpoint rejected credentials ({status}): {body}")]
    Rejected { status: UpstreamStatus, body: String },

    #[error("token endpoint returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// 取得令牌之后的数据请求失败
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: UpstreamStatus, body: String },

    #[error("upstream body is not JSON: {0}")]
    InvalidBody(#[source] reqwest::Error),
}

/// 网关边界错误，只暴露通用信息
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    MissingQuery,
    InvalidFoodId,
    SearchFailed,
    DetailFailed,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingQuery | AppError::InvalidFoodId => StatusCode::BAD_REQUEST,
            AppError::SearchFailed | AppError::DetailFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::MissingQuery => "Falta el parámetro 'q'",
            AppError::InvalidFoodId => "Identificador de alimento inválido",
            AppError::SearchFailed => "Error buscando alimentos",
            AppError::DetailFailed => "Error obteniendo detalle",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (self.status(), body).into_response()
    }
}
