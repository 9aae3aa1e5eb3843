//! # 批量处理模块
//!
//! 目录发现、单个 run 的读取编排与并行执行。
//! 核心计算本身不接触文件系统，这一层负责把目录结构
//! 解析成核心可消费的标签到序列映射。
//!
//! ## 子模块
//! - `collector`: 热流文件与 run/trial 目录发现
//! - `reader`: run / trial 读取编排
//! - `runner`: rayon 并行执行器
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `parsers/`, `conductivity/`, `models/`

pub mod collector;
pub mod reader;
pub mod runner;
