//! # `getracker-feed` - 上游价格服务适配层
//!
//! 基于 `reqwest` 实现 `PriceProvider` 端口，对接 OSRS Wiki 实时价格 API。

pub mod wiki;
