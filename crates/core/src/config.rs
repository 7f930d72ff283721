use serde::{Deserialize, Serialize};

/// 上游价格服务的默认基础地址
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://prices.runescape.wiki/api/v1/osrs";

/// 上游要求每个请求携带可识别的客户端标识
pub const DEFAULT_USER_AGENT: &str = "osrs-ge-tracker - a simple GE tracker";

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub mapping: MappingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// # Summary
/// 上游价格服务连接配置。
///
/// # Invariants
/// - `base_url` 不带末尾斜杠时与带斜杠时行为一致，由适配层负责归一化。
/// - `timeout_secs` 为 None 时沿用 HTTP 客户端默认行为 (不设超时)。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    // 静态物品映射 JSON 文件路径
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // 未设置 RUST_LOG 时使用的过滤级别
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            path: "mapping.json".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// 监听地址，如 `"0.0.0.0:8000"`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
