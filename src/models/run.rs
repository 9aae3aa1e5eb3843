//! # Run / Trial 结果数据模型
//!
//! 单次模拟 (run) 与同构多种子模拟集合 (trial) 的热导率分析结果。
//!
//! ## 依赖关系
//! - 被 `conductivity/`, `batch/`, `commands/` 使用
//! - 使用 `models/series.rs`

use crate::error::{Result, ThermokError};
use crate::models::series::{ConductivityEstimate, ConductivitySeries, EstimateStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 笛卡尔方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// 三个笛卡尔方向，各向同性平均要求全部存在
    pub fn all() -> [Axis; 3] {
        [Axis::X, Axis::Y, Axis::Z]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// 方向标签：笛卡尔方向加可选的分项贡献后缀
///
/// 例如 `x`, `y_bond`, `z_angle`。后缀为空表示总热流。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Direction {
    pub axis: Axis,
    pub term: String,
}

impl Direction {
    pub fn new(axis: Axis, term: impl Into<String>) -> Self {
        Direction {
            axis,
            term: term.into(),
        }
    }

    /// 此方向所属分项的各向同性标签
    pub fn iso_label(&self) -> String {
        iso_label(&self.term)
    }
}

impl FromStr for Direction {
    type Err = ThermokError;

    fn from_str(label: &str) -> Result<Self> {
        let mut chars = label.chars();
        let axis = match chars.next() {
            Some('x') => Axis::X,
            Some('y') => Axis::Y,
            Some('z') => Axis::Z,
            _ => return Err(ThermokError::InvalidDirection(label.to_string())),
        };
        let term: String = chars.collect();
        if !term.is_empty() && !term.starts_with('_') {
            return Err(ThermokError::InvalidDirection(label.to_string()));
        }
        Ok(Direction {
            axis,
            term,
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis, self.term)
    }
}

/// 分项贡献的各向同性标签（`iso`, `iso_bond`, ...）
pub fn iso_label(term: &str) -> String {
    format!("iso{}", term)
}

/// run_info.yaml 键值映射，带类型化访问器
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunInfo(pub BTreeMap<String, serde_yaml::Value>);

impl RunInfo {
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(|v| v.as_f64())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }
}

/// Lammps log 中一段 thermo 输出，表头到数值列的映射
pub type ThermoSection = BTreeMap<String, Vec<f64>>;

/// 单次模拟的热导率分析结果
#[derive(Debug, Clone)]
pub struct RunResult {
    /// run 名称（目录名）
    pub name: String,

    /// 相关时间序列 (ps)，所有方向共用
    pub time: Vec<f64>,

    /// 方向标签到累积热导率序列的映射
    pub k: BTreeMap<String, ConductivitySeries>,

    /// 方向标签到稳态估算值的映射
    pub k_est: BTreeMap<String, ConductivityEstimate>,

    /// 本 run 发现的方向
    pub directions: Vec<Direction>,

    /// run_info.yaml 内容（按需读取）
    pub info: Option<RunInfo>,

    /// log 文件中的 thermo 数据（按需读取）
    pub thermo: Option<Vec<ThermoSection>>,
}

impl RunResult {
    /// 方向中出现的分项贡献后缀，去重保序
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for d in &self.directions {
            if !terms.contains(&d.term) {
                terms.push(d.term.clone());
            }
        }
        terms
    }
}

/// trial 级平均视图
#[derive(Debug, Clone)]
pub struct TrialAverage {
    /// 方向标签到跨 run 逐点平均序列的映射
    pub k: BTreeMap<String, ConductivitySeries>,

    /// 方向标签到各 run 标量估算值算术平均的映射
    pub k_est: BTreeMap<String, ConductivityEstimate>,

    /// 方向标签到各 run 估算值离散统计的映射
    pub stats: BTreeMap<String, EstimateStats>,
}

/// 同一配置、不同随机种子的多次模拟集合
#[derive(Debug, Clone)]
pub struct TrialResult {
    /// trial 名称（目录名）
    pub name: String,

    /// run 名称列表，保持读取顺序
    pub runs: Vec<String>,

    /// run 名称到结果的映射
    pub data: BTreeMap<String, RunResult>,

    /// 跨 run 平均视图，至少一个 run 时才有定义
    pub avg: Option<TrialAverage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_plain() {
        let d: Direction = "x".parse().unwrap();
        assert_eq!(d.axis, Axis::X);
        assert_eq!(d.term, "");
        assert_eq!(d.to_string(), "x");
    }

    #[test]
    fn test_direction_parse_with_term() {
        let d: Direction = "z_angle".parse().unwrap();
        assert_eq!(d.axis, Axis::Z);
        assert_eq!(d.term, "_angle");
        assert_eq!(d.to_string(), "z_angle");
        assert_eq!(d.iso_label(), "iso_angle");
    }

    #[test]
    fn test_direction_parse_invalid() {
        assert!("w".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
        assert!("xbond".parse::<Direction>().is_err());
    }

    #[test]
    fn test_iso_label() {
        assert_eq!(iso_label(""), "iso");
        assert_eq!(iso_label("_bond"), "iso_bond");
    }

    #[test]
    fn test_run_info_accessors() {
        let yaml = "sigma: 1.5\nname: ideal-mof";
        let info: RunInfo = serde_yaml::from_str(yaml).unwrap();
        assert!((info.get_f64("sigma").unwrap() - 1.5).abs() < 1e-12);
        assert_eq!(info.get_str("name"), Some("ideal-mof"));
        assert!(info.get_f64("missing").is_none());
    }
}
