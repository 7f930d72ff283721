//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use getracker_core::item::index::MappingIndex;
use getracker_core::price::port::PriceProvider;

use crate::routes::{latest, snapshot, system, timeseries};

/// API 标题，同时作为根路径的返回信息
pub const API_TITLE: &str = "OSRS GE Tracker API";

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 映射索引只读，并发请求无需加锁。
#[derive(Clone)]
pub struct AppState {
    /// 物品映射索引
    pub mapping: Arc<MappingIndex>,
    /// 上游价格网关
    pub prices: Arc<dyn PriceProvider>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OSRS GE Tracker API",
        version = "1.0.0",
        description = "An API to track Old School RuneScape Grand Exchange prices.",
        license(name = "MIT")
    ),
    tags(
        (name = "系统 (System)", description = "存活探测"),
        (name = "价格 (Prices)", description = "最新价格、聚合快照与时间序列查询")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(system::root))
        .routes(routes!(latest::get_all_latest_prices))
        .routes(routes!(latest::get_latest_price))
        .routes(routes!(snapshot::get_5m_prices))
        .routes(routes!(snapshot::get_1h_prices))
        .routes(routes!(timeseries::get_timeseries_data))
        .with_state(state)
        .split_for_parts();

    // 只读公开接口，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 构建路由并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8000"`
///
/// # Returns
/// TCP 绑定失败或服务异常退出时返回错误。
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 GE Tracker API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
