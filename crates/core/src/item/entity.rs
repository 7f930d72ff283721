use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 对外输出时需要剔除的图标字段名
pub const ICON_FIELD: &str = "icon";

/// # Summary
/// 静态映射表中的一条物品记录。
///
/// # Invariants
/// - `id` 为正整数且在映射表内唯一。
/// - `extra` 保存除 `id` / `name` 外的全部原始字段 (如 `icon`、`limit`)，
///   按源文件中的顺序原样保留，系统不解释其含义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    // 物品 ID
    pub id: u32,
    // 物品名称 (不保证唯一)
    pub name: String,
    // 透传字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemRecord {
    /// # Summary
    /// 生成用于响应拼装的扁平字段表，剔除 `icon` 字段。
    ///
    /// # Logic
    /// 1. 依次写入 `id`、`name`。
    /// 2. 追加除 `icon` 外的透传字段，保持原顺序。
    ///
    /// # Returns
    /// 返回可直接与价格字段合并的 JSON 对象。
    pub fn public_fields(&self) -> Map<String, Value> {
        let mut fields = Map::with_capacity(self.extra.len() + 2);
        fields.insert("id".to_string(), Value::from(self.id));
        fields.insert("name".to_string(), Value::from(self.name.clone()));
        for (key, value) in &self.extra {
            if key != ICON_FIELD {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields
    }
}
