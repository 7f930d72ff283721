use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use getracker_core::item::entity::ItemRecord;
use getracker_core::item::index::MappingIndex;
use thiserror::Error;
use tracing::{error, info};

/// # Summary
/// 映射表加载错误。
///
/// # Invariants
/// - 仅在内部的可失败加载路径中使用，公开加载函数会将其降级为空索引。
#[derive(Error, Debug)]
pub enum MappingError {
    // 映射源不存在或不可读
    #[error("Could not read mapping source: {0}")]
    Io(#[from] std::io::Error),
    // 内容不是合法的物品记录数组
    #[error("Could not decode JSON from mapping source: {0}")]
    Parse(#[from] serde_json::Error),
}

/// # Summary
/// 从 JSON 数组读取器构建映射索引，失败时抛出错误。
///
/// # Arguments
/// * `reader`: 期望内容为 `[{"id": .., "name": .., ...}, ...]`。
///
/// # Returns
/// 成功返回索引，失败返回 `MappingError`。
pub fn try_load_mapping_from_reader<R: Read>(reader: R) -> Result<MappingIndex, MappingError> {
    let records: Vec<ItemRecord> = serde_json::from_reader(reader)?;
    Ok(MappingIndex::new(records))
}

/// # Summary
/// 从文件路径构建映射索引，失败时抛出错误。
pub fn try_load_mapping(path: impl AsRef<Path>) -> Result<MappingIndex, MappingError> {
    let file = File::open(path)?;
    try_load_mapping_from_reader(BufReader::new(file))
}

/// # Summary
/// 从文件路径加载映射索引 (降级模式)。
///
/// # Logic
/// 1. 打开并解析文件。
/// 2. 成功时记录已索引的物品数。
/// 3. 文件缺失或内容损坏时记录错误日志，返回空索引而不中断启动。
///
/// # Arguments
/// * `path`: 映射文件路径。
///
/// # Returns
/// 总是返回一个索引；失败时索引为空，此后所有物品解析都会失败。
pub fn load_mapping(path: impl AsRef<Path>) -> MappingIndex {
    let path = path.as_ref();
    match try_load_mapping(path) {
        Ok(index) => {
            info!("Loaded {} items from mapping {}", index.len(), path.display());
            index
        }
        Err(e) => {
            error!("Mapping {} unavailable, starting with an empty index: {}", path.display(), e);
            MappingIndex::empty()
        }
    }
}

/// # Summary
/// 从任意读取器加载映射索引 (降级模式)，语义与 `load_mapping` 相同。
pub fn load_mapping_from_reader<R: Read>(reader: R) -> MappingIndex {
    match try_load_mapping_from_reader(reader) {
        Ok(index) => {
            info!("Loaded {} items from mapping reader", index.len());
            index
        }
        Err(e) => {
            error!("Mapping reader unavailable, starting with an empty index: {}", e);
            MappingIndex::empty()
        }
    }
}
