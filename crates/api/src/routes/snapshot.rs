//! # 聚合快照路由控制器
//!
//! 实现 `/5m` 与 `/1h` 接口，输出形态与 `/latest` 一致。

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use getracker_core::item::index::MappingIndex;
use getracker_core::price::entity::{IntervalPrice, PriceRow, PriceTable};

use crate::error::ApiError;
use crate::routes::with_names;
use crate::server::AppState;
use crate::types::{SnapshotEntry, SnapshotQuery};

fn to_entries(mapping: &MappingIndex, table: &PriceTable<PriceRow<IntervalPrice>>) -> Vec<SnapshotEntry> {
    with_names(mapping, table)
        .into_iter()
        .map(|(id, name, price)| SnapshotEntry { id, name, price })
        .collect()
}

/// 获取 5 分钟聚合快照
#[utoipa::path(
    get,
    path = "/5m",
    tag = "价格 (Prices)",
    params(
        ("timestamp" = Option<i64>, Query, description = "时间桶起点 (Unix 秒)，缺省为最近一个时间桶")
    ),
    responses(
        (status = 200, description = "5 分钟快照列表", body = Vec<SnapshotEntry>),
        (status = 400, description = "查询参数非法", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_5m_prices(
    State(state): State<AppState>,
    query: Result<Query<SnapshotQuery>, QueryRejection>,
) -> Result<Json<Vec<SnapshotEntry>>, ApiError> {
    let Query(query) = query?;
    let prices = state.prices.snapshot_5m(query.timestamp).await;
    Ok(Json(to_entries(&state.mapping, &prices)))
}

/// 获取 1 小时聚合快照
#[utoipa::path(
    get,
    path = "/1h",
    tag = "价格 (Prices)",
    params(
        ("timestamp" = Option<i64>, Query, description = "时间桶起点 (Unix 秒)，缺省为最近一个时间桶")
    ),
    responses(
        (status = 200, description = "1 小时快照列表", body = Vec<SnapshotEntry>),
        (status = 400, description = "查询参数非法", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_1h_prices(
    State(state): State<AppState>,
    query: Result<Query<SnapshotQuery>, QueryRejection>,
) -> Result<Json<Vec<SnapshotEntry>>, ApiError> {
    let Query(query) = query?;
    let prices = state.prices.snapshot_1h(query.timestamp).await;
    Ok(Json(to_entries(&state.mapping, &prices)))
}
