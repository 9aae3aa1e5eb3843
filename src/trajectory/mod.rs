//! # 轨迹分析模块
//!
//! 周期性边界条件下的结构诊断：最小镜像距离与位移统计。
//! 热导率分析的结构侧对照，用于判断骨架在模拟中的刚性。
//!
//! ## 子模块
//! - `pbc`: 正交单胞最小镜像位移与距离
//! - `displacement`: 时间平均位移统计
//!
//! ## 依赖关系
//! - 被 `commands/analyze/distance.rs` 使用
//! - 使用 `models/trajectory.rs`

pub mod displacement;
pub mod pbc;

pub use pbc::{distance_from_reference, PbcCell};
