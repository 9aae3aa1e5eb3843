//! # 解析器模块
//!
//! 提供模拟输出文件的解析器：热流自相关文件、xyz 轨迹、
//! run_info.yaml 与 Lammps log。
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: flux, xyz, run_info, lammps_log

pub mod flux;
pub mod lammps_log;
pub mod run_info;
pub mod xyz;
