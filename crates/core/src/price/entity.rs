use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::price::error::PriceError;

/// # Summary
/// 上游价格表：物品 ID 字符串 -> 价格对象。
///
/// # Invariants
/// - 遍历顺序按键字符串升序，调用方不应依赖该顺序。
pub type PriceTable<T> = BTreeMap<String, T>;

/// # Summary
/// 上游价格对象的透传包装：原样保留上游字段，同时提供类型化视图 `T`。
///
/// # Invariants
/// - 序列化时只输出上游原始字段：未知字段保留，上游缺失的字段不补 null。
/// - 只有能解析为 `T` 的 JSON 对象才能构造，单条坏数据由调用方跳过。
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow<T> {
    fields: Map<String, Value>,
    view: T,
}

impl<T: Serialize + DeserializeOwned> PriceRow<T> {
    /// # Summary
    /// 从上游的单条 JSON 值构造。
    ///
    /// # Returns
    /// 非对象或字段类型不符时返回 `PriceError::Parse`。
    pub fn from_value(value: Value) -> Result<Self, PriceError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(PriceError::Parse(format!("expected an object, got {}", other)));
            }
        };
        let view = serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| PriceError::Parse(e.to_string()))?;
        Ok(Self { fields, view })
    }

    /// 由类型化数据构造，字段即 `T` 的序列化结果
    pub fn from_view(view: T) -> Self {
        let fields = match serde_json::to_value(&view) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        Self { fields, view }
    }
}

impl<T> PriceRow<T> {
    pub fn view(&self) -> &T {
        &self.view
    }

    /// 上游原始字段
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl<T> Serialize for PriceRow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for PriceRow<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// # Summary
/// 最新成交价对象 (对应上游 `/latest`)。
///
/// # Invariants
/// - 所有字段均可能为 null；作为类型化视图时缺失字段按 None 处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestPrice {
    /// 最近一次高价成交
    #[schema(example = 2000000)]
    pub high: Option<i64>,
    /// 最近一次低价成交
    #[schema(example = 1950000)]
    pub low: Option<i64>,
    /// 高价成交时间 (Unix 秒)
    #[schema(example = 1710000000)]
    pub high_time: Option<i64>,
    /// 低价成交时间 (Unix 秒)
    #[schema(example = 1709999990)]
    pub low_time: Option<i64>,
}

/// # Summary
/// 固定时间桶内的聚合价格快照 (对应上游 `/5m`、`/1h`)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntervalPrice {
    /// 高价成交均价
    pub avg_high_price: Option<i64>,
    /// 低价成交均价
    pub avg_low_price: Option<i64>,
    /// 高价成交量
    pub high_price_volume: Option<i64>,
    /// 低价成交量
    pub low_price_volume: Option<i64>,
}

/// # Summary
/// 时间序列中的单个数据点。
///
/// # Invariants
/// - 序列顺序由上游决定 (按时间升序)，本系统不重新排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesPoint {
    /// 时间桶起点 (Unix 秒)
    #[schema(example = 1710000000)]
    pub timestamp: i64,
    pub avg_high_price: Option<i64>,
    pub avg_low_price: Option<i64>,
    pub high_price_volume: Option<i64>,
    pub low_price_volume: Option<i64>,
}

/// # Summary
/// 时间序列步长枚举，仅允许上游支持的四种取值。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
pub enum Timestep {
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "24h")]
    Hour24,
}

impl Timestep {
    pub const ALL: [Timestep; 4] = [
        Timestep::Minute5,
        Timestep::Hour1,
        Timestep::Hour6,
        Timestep::Hour24,
    ];

    /// 上游识别的字符串形式
    pub fn as_str(&self) -> &'static str {
        match self {
            Timestep::Minute5 => "5m",
            Timestep::Hour1 => "1h",
            Timestep::Hour6 => "6h",
            Timestep::Hour24 => "24h",
        }
    }
}

impl FromStr for Timestep {
    type Err = PriceError;

    /// 严格匹配，不做大小写或别名转换
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestep::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| PriceError::InvalidTimestep(s.to_string()))
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
