use thiserror::Error;

/// # Summary
/// 物品标识解析错误枚举。
///
/// # Invariants
/// - 两种变体均表示客户端输入无法对应到映射表，由 HTTP 层统一映射为 404。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    // 标识既不是数字，也没有同名物品 (携带原始输入)
    #[error("Item '{0}' not found.")]
    NotFound(String),
    // 解析出了 ID，但映射表中不存在该记录
    #[error("Item with ID '{0}' not found in mapping.")]
    NotInMapping(u32),
}
