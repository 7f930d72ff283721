//! # 系统路由
//!
//! 存活探测与 API 基本信息。

use axum::Json;

use crate::server::API_TITLE;
use crate::types::MessageResponse;

/// 根路径，返回 API 标题
#[utoipa::path(
    get,
    path = "/",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "服务存活", body = MessageResponse)
    )
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: API_TITLE.to_string(),
    })
}
