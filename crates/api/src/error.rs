//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use getracker_core::item::error::ItemError;
use getracker_core::price::error::PriceError;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 资源未找到 (404)
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 下层业务错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `ItemError` 转换：标识无法解析一律视为 404
impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

/// 从 `QueryRejection` 转换：查询串无法解析时仍返回 `{"detail"}` 响应体
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// 从 `PriceError` 转换
impl From<PriceError> for ApiError {
    fn from(err: PriceError) -> Self {
        match &err {
            PriceError::InvalidTimestep(_) => ApiError::BadRequest(err.to_string()),
            // 网关对外已降级为空结果，正常情况下不会走到这里
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
