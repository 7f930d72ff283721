use async_trait::async_trait;

use crate::price::entity::{IntervalPrice, LatestPrice, PriceRow, PriceTable, TimeseriesPoint};
use crate::price::error::PriceError;

/// # Summary
/// 外部价格服务的网关接口 (Port)。
///
/// # Invariants
/// - 所有方法只读，不持有可变状态，可被多个请求并发调用。
/// - 上游网络失败或返回非 2xx 时不向调用方抛错，而是记录日志并返回空结果。
///   因此调用方无法仅凭结果区分 "无数据" 与 "上游不可用"。
/// - 不做缓存、不做重试。
/// - 价格对象按条解析并原样透传上游字段；无法解析的单条数据被跳过，不影响其余条目。
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// # Summary
    /// 获取全部物品的最新价格。
    ///
    /// # Returns
    /// 物品 ID 字符串 -> 最新价格；失败时为空表。
    async fn latest_all(&self) -> PriceTable<PriceRow<LatestPrice>>;

    /// # Summary
    /// 获取单个物品的最新价格。
    ///
    /// # Arguments
    /// * `item_id`: 物品 ID。
    ///
    /// # Returns
    /// 正常情况下仅含一个键 (请求的 ID)；上游无数据或失败时为空表。
    async fn latest_one(&self, item_id: u32) -> PriceTable<PriceRow<LatestPrice>>;

    /// # Summary
    /// 获取 5 分钟聚合快照。
    ///
    /// # Arguments
    /// * `timestamp`: 可选的时间桶起点；None 表示最近一个时间桶。
    async fn snapshot_5m(&self, timestamp: Option<i64>) -> PriceTable<PriceRow<IntervalPrice>>;

    /// # Summary
    /// 获取 1 小时聚合快照。
    ///
    /// # Arguments
    /// * `timestamp`: 可选的时间桶起点；None 表示最近一个时间桶。
    async fn snapshot_1h(&self, timestamp: Option<i64>) -> PriceTable<PriceRow<IntervalPrice>>;

    /// # Summary
    /// 获取单个物品的时间序列。
    ///
    /// # Logic
    /// 1. 校验 `timestep` 是否属于 `{5m, 1h, 6h, 24h}`，不合法时立即返回错误，不发起请求。
    /// 2. 请求上游并返回按上游顺序排列的数据点。
    ///
    /// # Arguments
    /// * `item_id`: 物品 ID。
    /// * `timestep`: 步长原始字符串。
    ///
    /// # Returns
    /// 步长非法返回 `PriceError::InvalidTimestep`；上游失败返回 `Ok(vec![])`。
    async fn timeseries(
        &self,
        item_id: u32,
        timestep: &str,
    ) -> Result<Vec<PriceRow<TimeseriesPoint>>, PriceError>;
}
