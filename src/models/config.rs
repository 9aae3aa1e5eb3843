//! # 计算参数数据模型
//!
//! Green-Kubo 热导率计算的物理参数与读取选项。
//! 所有参数显式传入各组件，不存在进程级全局配置。
//!
//! ## 依赖关系
//! - 被 `conductivity/`, `batch/`, `commands/` 使用
//! - 无外部模块依赖（除 `error`）

use crate::error::{Result, ThermokError};
use serde::{Deserialize, Serialize};

/// Green-Kubo 热导率计算参数
///
/// 默认值对应 80x80x80 Å 单胞、300 K、5 fs 时间步的 Lammps 模拟。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KParameters {
    /// Boltzmann 常数（模拟单位制，kcal/mol·K）
    pub kb: f64,

    /// 单位换算因子（换算到 W/mK）
    pub conv: f64,

    /// 时间步长 (fs)
    pub dt: f64,

    /// 模拟单胞体积 (Å³)
    pub volume: f64,

    /// 温度 (K)
    pub temp: f64,

    /// 热流文件名前缀，方向标签取前缀与扩展名之间的子串
    pub prefix: String,

    /// 分项贡献后缀（如 `_bond`, `_angle`），空字符串表示总热流
    pub terms: Vec<String>,

    /// 是否计算各向同性平均
    pub isotropic: bool,

    /// 是否计算 trial 级平均
    pub average: bool,

    /// 是否读取 run_info.yaml 附加到结果
    pub read_info: bool,

    /// 是否读取 log.lammps 的 thermo 数据附加到结果
    pub read_thermo: bool,
}

impl Default for KParameters {
    fn default() -> Self {
        KParameters {
            kb: 0.001987,
            conv: 69443.84,
            dt: 5.0,
            volume: 512000.0,
            temp: 300.0,
            prefix: "J0Jt_t".to_string(),
            terms: vec![String::new()],
            isotropic: true,
            average: true,
            read_info: false,
            read_thermo: false,
        }
    }
}

impl KParameters {
    /// 校验参数的物理合法性
    pub fn validate(&self) -> Result<()> {
        if self.kb <= 0.0 {
            return Err(ThermokError::InvalidArgument(format!(
                "kb must be positive, got {}",
                self.kb
            )));
        }
        if self.conv <= 0.0 {
            return Err(ThermokError::InvalidArgument(format!(
                "conv must be positive, got {}",
                self.conv
            )));
        }
        if self.dt <= 0.0 {
            return Err(ThermokError::InvalidArgument(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.volume <= 0.0 {
            return Err(ThermokError::InvalidArgument(format!(
                "volume must be positive, got {}",
                self.volume
            )));
        }
        if self.temp <= 0.0 {
            return Err(ThermokError::InvalidArgument(format!(
                "temp must be positive, got {}",
                self.temp
            )));
        }
        if self.prefix.is_empty() {
            return Err(ThermokError::InvalidArgument(
                "prefix must not be empty".to_string(),
            ));
        }
        if self.terms.is_empty() {
            return Err(ThermokError::InvalidArgument(
                "terms must contain at least one entry".to_string(),
            ));
        }
        Ok(())
    }
}

/// 热流文件读取与估算窗口选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// 跳过的平衡段记录数
    pub skip: usize,

    /// 热流值所在列（0 起始）
    pub flux_column: usize,

    /// 估算窗口起点 (ps)
    pub t0: f64,

    /// 估算窗口终点 (ps)，不含
    pub t1: f64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            skip: 0,
            flux_column: 3,
            t0: 5.0,
            t1: 10.0,
        }
    }
}

impl ReadOptions {
    /// 校验窗口与列设置
    pub fn validate(&self) -> Result<()> {
        if self.flux_column == 0 {
            return Err(ThermokError::InvalidArgument(
                "flux_column 0 is the correlation index, not a flux value".to_string(),
            ));
        }
        if self.t1 <= self.t0 {
            return Err(ThermokError::InvalidArgument(format!(
                "estimation window [{}, {}) is empty",
                self.t0, self.t1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let par = KParameters::default();
        assert!((par.kb - 0.001987).abs() < 1e-12);
        assert!((par.conv - 69443.84).abs() < 1e-6);
        assert!((par.volume - 512000.0).abs() < 1e-6);
        assert_eq!(par.prefix, "J0Jt_t");
        assert_eq!(par.terms, vec![String::new()]);
        assert!(par.isotropic);
        assert!(par.average);
        assert!(par.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nonpositive() {
        let mut par = KParameters::default();
        par.temp = 0.0;
        assert!(par.validate().is_err());

        let mut par = KParameters::default();
        par.volume = -1.0;
        assert!(par.validate().is_err());

        let mut par = KParameters::default();
        par.prefix = String::new();
        assert!(par.validate().is_err());
    }

    #[test]
    fn test_read_options_validate() {
        assert!(ReadOptions::default().validate().is_ok());

        let opts = ReadOptions {
            t0: 10.0,
            t1: 5.0,
            ..ReadOptions::default()
        };
        assert!(opts.validate().is_err());

        let opts = ReadOptions {
            flux_column: 0,
            ..ReadOptions::default()
        };
        assert!(opts.validate().is_err());
    }
}
