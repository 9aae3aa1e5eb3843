//! # analyze 命令实现
//!
//! 分析功能统一入口，包含多个子命令：
//! - `conductivity`: Green-Kubo 热导率分析
//! - `distance`: 轨迹最小镜像距离诊断
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 子模块: conductivity, distance

pub mod conductivity;
pub mod distance;

use crate::cli::analyze::{AnalyzeArgs, AnalyzeCommands};
use crate::error::Result;

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    match args.command {
        AnalyzeCommands::Conductivity(k_args) => conductivity::execute(k_args),
        AnalyzeCommands::Distance(d_args) => distance::execute(d_args),
    }
}
