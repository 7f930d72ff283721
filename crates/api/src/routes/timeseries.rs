//! # 时间序列路由控制器

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use getracker_core::price::entity::Timestep;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{TimeseriesQuery, TimeseriesResponse};

/// 获取物品的时间序列
///
/// `identifier` 可以是物品 ID 或名称；`timestep` 必须是 `5m`、`1h`、`6h`、`24h` 之一。
#[utoipa::path(
    get,
    path = "/timeseries/{identifier}",
    tag = "价格 (Prices)",
    params(
        ("identifier" = String, Path, description = "物品名称或 ID"),
        ("timestep" = String, Query, description = "步长: 5m | 1h | 6h | 24h")
    ),
    responses(
        (status = 200, description = "物品元数据与时间序列", body = TimeseriesResponse),
        (status = 400, description = "步长非法", body = crate::types::ApiErrorResponse),
        (status = 404, description = "物品不存在", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_timeseries_data(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    query: Result<Query<TimeseriesQuery>, QueryRejection>,
) -> Result<Json<TimeseriesResponse>, ApiError> {
    let item_id = state.mapping.resolve(&identifier)?;
    let Query(query) = query?;

    // 缺省与非法取值同样按 400 处理
    let timestep: Timestep = query.timestep.unwrap_or_default().parse()?;

    let timeseries = state.prices.timeseries(item_id, timestep.as_str()).await?;

    let record = state
        .mapping
        .get(&item_id.to_string())
        .ok_or_else(|| ApiError::Internal(format!("resolved item {} missing from mapping", item_id)))?;

    Ok(Json(TimeseriesResponse {
        item: record.public_fields(),
        timestep,
        timeseries,
    }))
}
