//! # 最新价格路由控制器
//!
//! 实现 `/latest` 与 `/latest/{identifier}` 两个接口。

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::routes::with_names;
use crate::server::AppState;
use crate::types::{LatestItemResponse, LatestPriceEntry};

/// 获取全部物品的最新价格
///
/// 返回上游当前有数据的所有物品，每项附带映射表中的名称。
/// 列表顺序由实现决定，调用方不应依赖。上游不可用时返回空列表。
#[utoipa::path(
    get,
    path = "/latest",
    tag = "价格 (Prices)",
    responses(
        (status = 200, description = "最新价格列表", body = Vec<LatestPriceEntry>)
    )
)]
pub async fn get_all_latest_prices(State(state): State<AppState>) -> Json<Vec<LatestPriceEntry>> {
    let prices = state.prices.latest_all().await;

    let entries = with_names(&state.mapping, &prices)
        .into_iter()
        .map(|(id, name, price)| LatestPriceEntry { id, name, price })
        .collect();

    Json(entries)
}

/// 获取单个物品的最新价格
///
/// `identifier` 可以是物品 ID (如 `4151`) 或名称 (如 `Abyssal whip`，大小写不敏感)。
#[utoipa::path(
    get,
    path = "/latest/{identifier}",
    tag = "价格 (Prices)",
    params(
        ("identifier" = String, Path, description = "物品名称或 ID")
    ),
    responses(
        (status = 200, description = "物品元数据与最新价格", body = LatestItemResponse),
        (status = 404, description = "物品不存在或无价格数据", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_latest_price(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<LatestItemResponse>, ApiError> {
    let item_id = state.mapping.resolve(&identifier)?;
    let key = item_id.to_string();

    let mut prices = state.prices.latest_one(item_id).await;

    // 上游失败与确实无数据在此处无法区分，统一视为 404
    let price_data = prices.remove(&key).ok_or_else(|| {
        ApiError::NotFound(format!("Price data not found for item ID {}.", item_id))
    })?;

    let record = state
        .mapping
        .get(&key)
        .ok_or_else(|| ApiError::Internal(format!("resolved item {} missing from mapping", item_id)))?;

    Ok(Json(LatestItemResponse {
        item: record.public_fields(),
        price_data,
    }))
}
