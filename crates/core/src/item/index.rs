use std::collections::HashMap;

use crate::item::entity::ItemRecord;
use crate::item::error::ItemError;

/// # Summary
/// 物品映射索引，进程启动时构建一次，此后只读。
///
/// # Invariants
/// - `by_id` 的每个键都是对应记录 `id` 的十进制字符串形式。
/// - `records` 保留加载顺序，名称搜索按此顺序扫描。
/// - 源数据中重复的 `id` 以后出现者为准 (键查找层面)。
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
    // 按加载顺序保存的全部记录
    records: Vec<ItemRecord>,
    // ID 字符串 -> records 下标
    by_id: HashMap<String, usize>,
}

impl MappingIndex {
    /// # Summary
    /// 由一组物品记录构建索引。
    ///
    /// # Logic
    /// 1. 保存记录的加载顺序。
    /// 2. 以 `id.to_string()` 为键建立下标表。
    ///
    /// # Arguments
    /// * `records`: 按源顺序排列的物品记录。
    ///
    /// # Returns
    /// 返回不可变的映射索引。
    pub fn new(records: Vec<ItemRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(pos, record)| (record.id.to_string(), pos))
            .collect();
        Self { records, by_id }
    }

    /// 空索引，用于映射源不可用时的降级启动
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// 按加载顺序遍历记录
    pub fn iter(&self) -> impl Iterator<Item = &ItemRecord> {
        self.records.iter()
    }

    /// # Summary
    /// 按 ID 字符串直接查找记录。
    ///
    /// # Arguments
    /// * `id`: 十进制 ID 字符串，如 `"4151"`。
    ///
    /// # Returns
    /// 存在则返回记录引用，否则返回 None。
    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        self.by_id.get(id).and_then(|&pos| self.records.get(pos))
    }

    /// # Summary
    /// 按名称查找物品 ID (大小写不敏感的精确匹配)。
    ///
    /// # Logic
    /// 1. 将输入与每条记录名称统一转为小写后逐条比较。
    /// 2. 按加载顺序返回第一个命中的 ID。
    ///
    /// # Invariants
    /// - 不做子串或模糊匹配。
    /// - 存在同名物品时取第一个，此歧义来自上游数据，本系统不做消解。
    ///
    /// # Returns
    /// 命中返回 ID，否则返回 None。
    pub fn find_id_by_name(&self, name: &str) -> Option<u32> {
        let needle = name.to_lowercase();
        self.records
            .iter()
            .find(|record| record.name.to_lowercase() == needle)
            .map(|record| record.id)
    }

    /// # Summary
    /// 将用户给出的标识 (数字 ID 或名称) 解析为经过映射表校验的物品 ID。
    ///
    /// # Logic
    /// 1. 纯数字输入直接解析为 ID。
    /// 2. 否则按名称搜索。
    /// 3. 未得到 ID 时返回 `NotFound`，携带原始输入。
    /// 4. 得到的 ID 必须存在于映射表中，否则返回 `NotInMapping`。
    ///
    /// # Arguments
    /// * `token`: 原始标识，如 `"4151"` 或 `"abyssal whip"`。
    ///
    /// # Returns
    /// 成功返回物品 ID，失败返回 `ItemError`。
    pub fn resolve(&self, token: &str) -> Result<u32, ItemError> {
        let parsed = if is_numeric(token) {
            token.parse::<u32>().ok()
        } else {
            self.find_id_by_name(token)
        };

        let id = parsed.ok_or_else(|| ItemError::NotFound(token.to_string()))?;

        if self.get(&id.to_string()).is_none() {
            return Err(ItemError::NotInMapping(id));
        }

        Ok(id)
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
