//! # `getracker-api` - HTTP API 网关
//!
//! 本 crate 是 GE Tracker 的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 将用户给出的物品标识 (数字 ID 或名称) 解析为映射表中存在的 ID
//! - 调用下层 `PriceProvider` 获取上游价格数据
//! - 将价格数据与映射表元数据合并为扁平的 JSON 响应

pub mod types;
pub mod error;
pub mod routes;
pub mod server;
