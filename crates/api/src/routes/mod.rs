//! # 路由控制器

pub mod latest;
pub mod snapshot;
pub mod system;
pub mod timeseries;

use getracker_core::item::index::MappingIndex;
use getracker_core::price::entity::PriceTable;

use crate::types::UNKNOWN_ITEM_NAME;

/// # Summary
/// 将上游价格表展开为 `(id, name, price)` 序列。
///
/// # Logic
/// 1. 按价格表的遍历顺序逐项处理。
/// 2. 名称取自映射表，缺失时使用 "Unknown"。
/// 3. 键不是十进制整数的条目跳过。
pub(crate) fn with_names<T: Clone>(
    mapping: &MappingIndex,
    table: &PriceTable<T>,
) -> Vec<(u32, String, T)> {
    table
        .iter()
        .filter_map(|(key, price)| {
            let Ok(id) = key.parse::<u32>() else {
                tracing::debug!("Skipping non-numeric price key {:?}", key);
                return None;
            };
            let name = mapping
                .get(key)
                .map(|record| record.name.clone())
                .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string());
            Some((id, name, price.clone()))
        })
        .collect()
}
