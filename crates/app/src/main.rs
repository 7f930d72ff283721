use std::sync::Arc;

use getracker_api::server::{AppState, start_server};
use getracker_core::config::LogConfig;
use getracker_feed::wiki::WikiPriceProvider;
use getracker_store::mapping::load_mapping;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod settings;

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. 优先使用 `RUST_LOG`，否则使用配置中的级别。
/// 2. 通过非阻塞写入器输出到 stdout。
///
/// # Returns
/// 写入器守卫，必须持有到进程退出，否则尾部日志会丢失。
fn init_logging(log: &LogConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
    guard
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责加载配置、实例化映射索引与价格网关并注入到 API 层。
///
/// # Logic
/// 1. 加载配置并初始化日志。
/// 2. 加载静态映射表 (失败时以空索引降级启动)。
/// 3. 实例化上游价格网关。
/// 4. 启动 HTTP 服务，直到监听失败或收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load(&settings::config_path())?;
    let _log_guard = init_logging(&config.log);
    info!("GE Tracker starting...");

    // 2. 基础设施层
    let mapping = Arc::new(load_mapping(&config.mapping.path));
    let prices = Arc::new(WikiPriceProvider::new(&config.upstream)?);
    info!(
        "Mapping ready with {} items, upstream {}",
        mapping.len(),
        config.upstream.base_url
    );

    // 3. API 层
    let state = AppState { mapping, prices };
    let bind_addr = config.server.bind_addr();

    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
