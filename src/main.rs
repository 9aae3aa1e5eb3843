//! # thermok - 多孔晶体热导率与轨迹分析工具箱
//!
//! 对 Lammps 模拟输出做 Green-Kubo 热导率后处理与轨迹结构诊断。
//!
//! ## 子命令
//! - `analyze` - 分析功能
//!   - `conductivity` - 热流自相关到热导率的积分、估算与聚合
//!   - `distance` - 周期性边界下的骨架位移诊断
//! - `collect` - 收集 trial 集合的估算结果并导出
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/          (命令行参数定义)
//!   ├── commands/     (命令执行逻辑)
//!   │     ├── batch/        (目录发现与并行读取)
//!   │     ├── parsers/      (模拟输出解析器)
//!   │     ├── conductivity/ (Green-Kubo 核心计算)
//!   │     ├── trajectory/   (周期性边界几何)
//!   │     └── models/       (数据模型)
//!   ├── utils/        (工具函数)
//!   └── error.rs      (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod conductivity;
mod error;
mod models;
mod parsers;
mod trajectory;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
