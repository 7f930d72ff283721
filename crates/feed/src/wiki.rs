use std::time::Duration;

use async_trait::async_trait;
use getracker_core::config::UpstreamConfig;
use getracker_core::price::entity::{
    IntervalPrice, LatestPrice, PriceRow, PriceTable, Timestep, TimeseriesPoint,
};
use getracker_core::price::error::PriceError;
use getracker_core::price::port::PriceProvider;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// # Summary
/// OSRS Wiki 实时价格 API 的网关实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，每个请求都携带配置的 User-Agent。
/// - 每次调用只发起一个 GET 请求，不缓存、不重试。
/// - 上游失败一律降级为空结果并记录 warn 日志。
/// - `data` 内的价格对象逐条解析，单条坏数据只跳过该条。
#[derive(Clone)]
pub struct WikiPriceProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 去除末尾斜杠后的基础地址
    base_url: String,
}

/// # Summary
/// 上游响应的统一外层结构。
///
/// # Invariants
/// - 缺少 `data` 字段或其为 null 时按空结果处理。
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    data: Option<T>,
}

impl WikiPriceProvider {
    /// # Summary
    /// 根据上游配置创建网关实例。
    ///
    /// # Logic
    /// 1. 安装进程级 rustls 加密后端 (已安装时跳过)。
    /// 2. 设置默认 User-Agent Header。
    /// 3. 仅在配置了 `timeout_secs` 时设置超时。
    /// 4. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 上游连接配置。
    ///
    /// # Returns
    /// 成功返回网关实例；User-Agent 非法或客户端构建失败返回 `PriceError::Network`。
    pub fn new(config: &UpstreamConfig) -> Result<Self, PriceError> {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }

        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| PriceError::Network(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| PriceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Summary
    /// 向上游发起一次 GET 请求并解包 `data` 字段。
    ///
    /// # Logic
    /// 1. 拼接 `base_url + path` 并附加查询参数。
    /// 2. 非 2xx 状态码返回 `Status`。
    /// 3. 解析 JSON 外层结构，取出 `data`；缺失时返回默认值。
    ///
    /// # Returns
    /// 成功返回 `data` 内容，失败返回 `PriceError`。
    async fn fetch<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, PriceError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let resp = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| PriceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PriceError::Status(status.as_u16()));
        }

        let envelope: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| PriceError::Parse(e.to_string()))?;

        Ok(envelope.data.unwrap_or_default())
    }

    /// 与 `fetch` 相同，但失败时记录日志并返回空结果
    async fn fetch_or_empty<T>(&self, what: &str, path: &str, params: &[(&str, String)]) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.fetch(path, params).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Error fetching {}: {}", what, e);
                T::default()
            }
        }
    }
}

/// # Summary
/// 逐条解析上游价格表，跳过无法解析的条目。
///
/// # Arguments
/// * `what`: 日志中使用的数据名称。
/// * `raw`: 上游 `data` 对象 (物品 ID -> 原始价格对象)。
fn decode_table<T>(what: &str, raw: Map<String, Value>) -> PriceTable<PriceRow<T>>
where
    T: Serialize + DeserializeOwned,
{
    raw.into_iter()
        .filter_map(|(key, value)| match PriceRow::from_value(value) {
            Ok(row) => Some((key, row)),
            Err(e) => {
                warn!("Skipping malformed {} entry '{}': {}", what, key, e);
                None
            }
        })
        .collect()
}

/// 逐条解析上游数据点列表，保持上游顺序并跳过无法解析的点
fn decode_series<T>(what: &str, raw: Vec<Value>) -> Vec<PriceRow<T>>
where
    T: Serialize + DeserializeOwned,
{
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match PriceRow::from_value(value) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!("Skipping malformed {} point #{}: {}", what, index, e);
                None
            }
        })
        .collect()
}

fn timestamp_params(timestamp: Option<i64>) -> Vec<(&'static str, String)> {
    timestamp
        .map(|ts| vec![("timestamp", ts.to_string())])
        .unwrap_or_default()
}

#[async_trait]
impl PriceProvider for WikiPriceProvider {
    async fn latest_all(&self) -> PriceTable<PriceRow<LatestPrice>> {
        let raw = self.fetch_or_empty("latest prices", "/latest", &[]).await;
        decode_table("latest prices", raw)
    }

    async fn latest_one(&self, item_id: u32) -> PriceTable<PriceRow<LatestPrice>> {
        let raw = self
            .fetch_or_empty("latest prices", "/latest", &[("id", item_id.to_string())])
            .await;
        decode_table("latest prices", raw)
    }

    async fn snapshot_5m(&self, timestamp: Option<i64>) -> PriceTable<PriceRow<IntervalPrice>> {
        let raw = self
            .fetch_or_empty("5m prices", "/5m", &timestamp_params(timestamp))
            .await;
        decode_table("5m prices", raw)
    }

    async fn snapshot_1h(&self, timestamp: Option<i64>) -> PriceTable<PriceRow<IntervalPrice>> {
        let raw = self
            .fetch_or_empty("1h prices", "/1h", &timestamp_params(timestamp))
            .await;
        decode_table("1h prices", raw)
    }

    /// # Summary
    /// 获取单个物品的时间序列。
    ///
    /// # Logic
    /// 1. 先校验步长，非法时直接返回错误，不发起请求。
    /// 2. 请求 `/timeseries?id=..&timestep=..`，失败降级为空序列。
    /// 3. 逐点解析，坏数据点被跳过。
    async fn timeseries(
        &self,
        item_id: u32,
        timestep: &str,
    ) -> Result<Vec<PriceRow<TimeseriesPoint>>, PriceError> {
        let step: Timestep = timestep.parse()?;
        let params = [
            ("id", item_id.to_string()),
            ("timestep", step.as_str().to_string()),
        ];
        let raw = self
            .fetch_or_empty("timeseries data", "/timeseries", &params)
            .await;
        Ok(decode_series("timeseries data", raw))
    }
}
