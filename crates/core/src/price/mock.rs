//! 测试用的内存价格网关，仅在 `test-utils` feature 下编译。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::price::entity::{
    IntervalPrice, LatestPrice, PriceRow, PriceTable, Timestep, TimeseriesPoint,
};
use crate::price::error::PriceError;
use crate::price::port::PriceProvider;

/// # Summary
/// 预置数据的 PriceProvider 实现，并记录每种操作被调用的次数。
///
/// # Invariants
/// - 行为与真实网关一致：未预置的数据返回空结果，非法步长不计入调用次数。
#[derive(Default)]
pub struct MockPriceProvider {
    latest: PriceTable<PriceRow<LatestPrice>>,
    snapshots_5m: PriceTable<PriceRow<IntervalPrice>>,
    snapshots_1h: PriceTable<PriceRow<IntervalPrice>>,
    series: DashMap<(u32, Timestep), Vec<PriceRow<TimeseriesPoint>>>,
    // 操作名 -> 调用次数
    calls: DashMap<&'static str, usize>,
}

impl MockPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latest(mut self, item_id: u32, price: LatestPrice) -> Self {
        self.latest.insert(item_id.to_string(), PriceRow::from_view(price));
        self
    }

    pub fn with_snapshot_5m(mut self, item_id: u32, price: IntervalPrice) -> Self {
        self.snapshots_5m.insert(item_id.to_string(), PriceRow::from_view(price));
        self
    }

    pub fn with_snapshot_1h(mut self, item_id: u32, price: IntervalPrice) -> Self {
        self.snapshots_1h.insert(item_id.to_string(), PriceRow::from_view(price));
        self
    }

    pub fn with_timeseries(
        self,
        item_id: u32,
        timestep: Timestep,
        points: Vec<TimeseriesPoint>,
    ) -> Self {
        let rows = points.into_iter().map(PriceRow::from_view).collect();
        self.series.insert((item_id, timestep), rows);
        self
    }

    /// 指定操作被调用的次数
    pub fn call_count(&self, op: &str) -> usize {
        self.calls.get(op).map(|count| *count).unwrap_or(0)
    }

    /// 所有 "上游请求" 的总次数
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    fn record(&self, op: &'static str) {
        *self.calls.entry(op).or_insert(0) += 1;
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    async fn latest_all(&self) -> PriceTable<PriceRow<LatestPrice>> {
        self.record("latest_all");
        self.latest.clone()
    }

    async fn latest_one(&self, item_id: u32) -> PriceTable<PriceRow<LatestPrice>> {
        self.record("latest_one");
        let key = item_id.to_string();
        self.latest
            .get(&key)
            .map(|price| PriceTable::from([(key, price.clone())]))
            .unwrap_or_default()
    }

    async fn snapshot_5m(&self, _timestamp: Option<i64>) -> PriceTable<PriceRow<IntervalPrice>> {
        self.record("snapshot_5m");
        self.snapshots_5m.clone()
    }

    async fn snapshot_1h(&self, _timestamp: Option<i64>) -> PriceTable<PriceRow<IntervalPrice>> {
        self.record("snapshot_1h");
        self.snapshots_1h.clone()
    }

    async fn timeseries(
        &self,
        item_id: u32,
        timestep: &str,
    ) -> Result<Vec<PriceRow<TimeseriesPoint>>, PriceError> {
        let step: Timestep = timestep.parse()?;
        self.record("timeseries");
        Ok(self
            .series
            .get(&(item_id, step))
            .map(|points| points.value().clone())
            .unwrap_or_default())
    }
}
