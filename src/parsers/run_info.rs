//! # run_info.yaml 解析器
//!
//! 读取单个 run 目录下的元数据文件（随机种子、力场缩放参数等），
//! 以只读键值映射提供给聚合层做结果标注。
//!
//! ## 依赖关系
//! - 被 `batch/reader.rs`, `commands/collect.rs` 使用
//! - 使用 `models/run.rs` 的 RunInfo
//! - 使用 `serde_yaml` 反序列化

use crate::error::{Result, ThermokError};
use crate::models::RunInfo;
use std::fs;
use std::path::Path;

/// run_info 文件的默认文件名
pub const RUN_INFO_FILENAME: &str = "run_info.yaml";

/// 读取 run 目录下的 run_info.yaml
pub fn read_run_info(run_dir: &Path) -> Result<RunInfo> {
    let path = run_dir.join(RUN_INFO_FILENAME);
    if !path.exists() {
        return Err(ThermokError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(&path).map_err(|e| ThermokError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_run_info(&content)
}

/// 从字符串内容解析 run_info 映射
pub fn parse_run_info(content: &str) -> Result<RunInfo> {
    let info: RunInfo = serde_yaml::from_str(content)?;
    Ok(info)
}
