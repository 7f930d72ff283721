//! # `getracker-store` - 静态物品映射加载
//!
//! 从本地 JSON 文件读取物品映射表并构建只读索引。
//! 加载失败时降级为空索引，保证进程仍可启动。

pub mod mapping;
