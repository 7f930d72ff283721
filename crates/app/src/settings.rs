//! # 配置加载
//!
//! 按 默认值 -> 配置文件 -> 环境变量 的顺序叠加出最终的 `AppConfig`。

use config::{Config, ConfigError, Environment, File, Map};
use getracker_core::config::AppConfig;

/// 未设置 `GETRACKER_CONFIG` 时读取的配置文件 (扩展名自动识别)
const DEFAULT_CONFIG_FILE: &str = "config/default";

/// 环境变量前缀，如 `GETRACKER__SERVER__PORT=9000`
const ENV_PREFIX: &str = "GETRACKER";

/// 配置文件路径：优先取 `GETRACKER_CONFIG`
pub fn config_path() -> String {
    std::env::var("GETRACKER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
}

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 读取可选的配置文件 (不存在时跳过)。
/// 2. 叠加 `GETRACKER__` 前缀的环境变量。
/// 3. 未出现的字段回退到 `AppConfig::default()`。
///
/// # Arguments
/// * `path`: 配置文件路径。
///
/// # Returns
/// 成功返回配置；文件格式错误或字段类型不匹配返回 `ConfigError`。
pub fn load(path: &str) -> Result<AppConfig, ConfigError> {
    load_with_env(path, None)
}

/// # Summary
/// 与 `load` 相同，但环境变量可由调用方提供。
///
/// # Arguments
/// * `path`: 配置文件路径。
/// * `env`: 替代进程环境的变量表；None 时读取进程环境。
fn load_with_env(path: &str, env: Option<Map<String, String>>) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(env),
        )
        .build()?
        .try_deserialize()
}
