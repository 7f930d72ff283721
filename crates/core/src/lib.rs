//! # `getracker-core` - 领域核心
//!
//! 定义物品映射、价格载荷等领域实体，以及价格网关的端口 (Port) 契约。
//! 本 crate 不做任何 IO，具体实现由 `store` / `feed` 等适配层提供。

pub mod config;

pub mod item {
    pub mod entity;
    pub mod error;
    pub mod index;
}

pub mod price {
    pub mod entity;
    pub mod error;
    #[cfg(feature = "test-utils")]
    pub mod mock;
    pub mod port;
}
