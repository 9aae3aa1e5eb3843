//! # 热流与热导率序列数据模型
//!
//! 定义热流自相关序列、累积热导率序列及其标量估算值。
//! 序列一经创建不再原地修改，平均等派生操作产生新序列。
//!
//! ## 依赖关系
//! - 被 `parsers/flux.rs`, `conductivity/` 使用
//! - 无外部模块依赖（除 `error`）

use crate::error::{Result, ThermokError};
use serde::{Deserialize, Serialize};

/// 单方向热流自相关时间序列
///
/// `time` 与 `flux` 为等长平行数组，time 单位 ps。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluxSeries {
    /// 相关时间 (ps)，由记录序号与时间步长导出
    pub time: Vec<f64>,

    /// 热流自相关值
    pub flux: Vec<f64>,
}

impl FluxSeries {
    /// 由平行数组创建，长度不一致时报错
    pub fn new(time: Vec<f64>, flux: Vec<f64>) -> Result<Self> {
        if time.len() != flux.len() {
            return Err(ThermokError::LengthMismatch {
                name: "flux".to_string(),
                expected: time.len(),
                found: flux.len(),
            });
        }
        Ok(FluxSeries { time, flux })
    }

    pub fn len(&self) -> usize {
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }
}

/// 累积热导率序列
///
/// 与来源 FluxSeries 等长且按索引对齐。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConductivitySeries {
    /// 累积热导率 (W/mK)
    pub values: Vec<f64>,
}

impl ConductivitySeries {
    pub fn new(values: Vec<f64>) -> Self {
        ConductivitySeries { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 稳态热导率估算值
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConductivityEstimate {
    /// 窗口内热导率的算术平均 (W/mK)
    pub value: f64,

    /// 窗口内热导率对时间的线性回归斜率，偏离零表示未达平台
    pub slope: f64,
}

/// 多来源估算值的离散统计
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EstimateStats {
    pub max: f64,
    pub min: f64,
    pub std: f64,
}

impl EstimateStats {
    /// 由若干独立估算值计算 max/min/std（总体标准差）
    pub fn from_estimates(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        Some(EstimateStats {
            max,
            min,
            std: var.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flux_series_length_check() {
        let ok = FluxSeries::new(vec![0.0, 0.005], vec![1.0, 2.0]);
        assert!(ok.is_ok());
        assert_eq!(ok.unwrap().len(), 2);

        let bad = FluxSeries::new(vec![0.0], vec![1.0, 2.0]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_estimate_stats() {
        let stats = EstimateStats::from_estimates(&[1.0, 2.0, 3.0]).unwrap();
        assert!((stats.max - 3.0).abs() < 1e-12);
        assert!((stats.min - 1.0).abs() < 1e-12);
        // population std of [1, 2, 3] = sqrt(2/3)
        assert!((stats.std - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_stats_empty() {
        assert!(EstimateStats::from_estimates(&[]).is_none());
    }
}
