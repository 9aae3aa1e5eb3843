//! # collect 子命令 CLI 定义
//!
//! trial 集合的热导率估算收集与导出参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use crate::cli::analyze::KParArgs;
use clap::Args;
use std::path::PathBuf;

/// collect 命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory containing trial subdirectories
    pub set_dir: PathBuf,

    /// Direction label to collect (e.g. "iso", "x", "iso_bond")
    #[arg(long, default_value = "iso")]
    pub label: String,

    /// Output YAML file for collected results
    #[arg(short, long, default_value = "kest_results.yaml")]
    pub output: PathBuf,

    /// Optional CSV output alongside the YAML dump
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Comma-separated run_info.yaml keys to annotate each trial with (e.g. "sigma,epsilon")
    #[arg(long, value_delimiter = ',')]
    pub info_keys: Vec<String>,

    #[command(flatten)]
    pub kpar: KParArgs,

    /// Number of parallel jobs for reading runs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
