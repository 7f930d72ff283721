//! # DTO (Data Transfer Object) 层
//!
//! 将映射记录与上游价格载荷拼装为面向客户端的扁平 JSON 结构。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use getracker_core::price::entity::{
    IntervalPrice, LatestPrice, PriceRow, Timestep, TimeseriesPoint,
};

/// 映射表中缺少记录时使用的物品名称
pub const UNKNOWN_ITEM_NAME: &str = "Unknown";

// ============================================================
//  价格列表 DTO
// ============================================================

/// 最新价格列表中的一项：`{id, name, high, low, highTime, lowTime}`
///
/// 价格字段原样来自上游，上游缺失的字段不会出现。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LatestPriceEntry {
    /// 物品 ID
    #[schema(example = 4151)]
    pub id: u32,
    /// 物品名称 (映射表缺失时为 "Unknown")
    #[schema(example = "Abyssal whip")]
    pub name: String,
    #[serde(flatten)]
    #[schema(value_type = LatestPrice)]
    pub price: PriceRow<LatestPrice>,
}

/// 聚合快照列表中的一项：`{id, name, avgHighPrice, avgLowPrice, highPriceVolume, lowPriceVolume}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapshotEntry {
    /// 物品 ID
    #[schema(example = 4151)]
    pub id: u32,
    /// 物品名称 (映射表缺失时为 "Unknown")
    #[schema(example = "Abyssal whip")]
    pub name: String,
    #[serde(flatten)]
    #[schema(value_type = IntervalPrice)]
    pub price: PriceRow<IntervalPrice>,
}

// ============================================================
//  单物品 DTO
// ============================================================

/// 单物品最新价格：映射记录字段 (不含 icon) + `price_data`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LatestItemResponse {
    /// 映射记录的全部字段 (id、name、limit 等)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub item: Map<String, Value>,
    #[schema(value_type = LatestPrice)]
    pub price_data: PriceRow<LatestPrice>,
}

/// 单物品时间序列：映射记录字段 (不含 icon) + `timestep` + `timeseries`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimeseriesResponse {
    /// 映射记录的全部字段 (id、name、limit 等)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub item: Map<String, Value>,
    pub timestep: Timestep,
    /// 上游顺序 (按时间升序) 的数据点
    #[schema(value_type = Vec<TimeseriesPoint>)]
    pub timeseries: Vec<PriceRow<TimeseriesPoint>>,
}

// ============================================================
//  查询参数
// ============================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct TimeseriesQuery {
    pub timestep: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SnapshotQuery {
    pub timestamp: Option<i64>,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 根路径响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "OSRS GE Tracker API")]
    pub message: String,
}

/// 失败响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述信息
    #[schema(example = "Item 'dragon claws' not found.")]
    pub detail: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { detail: msg.into() }
    }
}
