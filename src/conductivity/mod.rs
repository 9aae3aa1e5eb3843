//! # 热导率计算模块
//!
//! 提供 Green-Kubo 热导率计算的核心算法：
//! 热流自相关积分、稳态估算与多方向/多 run 聚合。
//!
//! ## 子模块
//! - `integrator`: 热流自相关到累积热导率的积分
//! - `estimator`: 窗口平均估算与离散统计
//! - `aggregate`: run 级与 trial 级聚合
//! - `export`: 结果映射导出
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/` 使用
//! - 使用 `models/` 数据模型

pub mod aggregate;
pub mod estimator;
pub mod export;
pub mod integrator;

pub use aggregate::{analyze_run, average_series, average_trial};
pub use estimator::estimate_k;
pub use integrator::calculate_k;
