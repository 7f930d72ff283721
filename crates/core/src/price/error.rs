use thiserror::Error;

/// # Summary
/// 价格网关错误枚举。
///
/// # Invariants
/// - `Network` / `Status` / `Parse` 只在网关内部流转，对外统一降级为空结果。
/// - `InvalidTimestep` 是客户端参数错误，必须在发起任何上游请求前返回。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 上游返回非 2xx 状态码
    #[error("Upstream returned HTTP {0}")]
    Status(u16),
    // 响应体无法解析
    #[error("Parse error: {0}")]
    Parse(String),
    // 时间步长不在允许集合内，原始取值只用于日志
    #[error("Invalid timestep. Must be one of '5m', '1h', '6h', '24h'.")]
    InvalidTimestep(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timestep_message() {
        assert_eq!(
            PriceError::InvalidTimestep("30m".to_string()).to_string(),
            "Invalid timestep. Must be one of '5m', '1h', '6h', '24h'."
        );
    }
}
