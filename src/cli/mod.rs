//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 分析功能（嵌套子命令）
//!   - `conductivity`: Green-Kubo 热导率分析
//!   - `distance`: 轨迹最小镜像距离诊断
//! - `collect`: 收集 trial 集合的热导率结果
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze, collect

pub mod analyze;
pub mod collect;

use clap::{Parser, Subcommand};

/// thermok - 多孔晶体热导率与轨迹分析工具箱
#[derive(Parser)]
#[command(name = "thermok")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Green-Kubo thermal conductivity and trajectory analysis toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze simulation output (thermal conductivity, trajectory distances)
    Analyze(analyze::AnalyzeArgs),

    /// Collect thermal conductivity estimates over a set of trials
    Collect(collect::CollectArgs),
}
