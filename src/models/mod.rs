//! # 数据模型模块
//!
//! 定义热导率分析与轨迹分析的核心数据结构。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `conductivity/`, `trajectory/`, `commands/` 使用
//! - 无外部模块依赖（除 `error`）

pub mod config;
pub mod run;
pub mod series;
pub mod trajectory;

pub use config::{KParameters, ReadOptions};
pub use run::{Axis, Direction, RunInfo, RunResult, TrialAverage, TrialResult};
pub use series::{ConductivityEstimate, ConductivitySeries, EstimateStats, FluxSeries};
pub use trajectory::{Trajectory, TrajectoryFrame};
