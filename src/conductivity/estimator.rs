//! # 稳态热导率估算器
//!
//! 在给定时间窗口内将累积热导率序列约简为标量估算值，
//! 并以窗口内的线性回归斜率作为平台判据。
//!
//! ## 依赖关系
//! - 被 `conductivity/aggregate.rs` 调用
//! - 使用 `models/series.rs`

use crate::error::{Result, ThermokError};
use crate::models::{ConductivityEstimate, ConductivitySeries};

/// 时间样本匹配容差 (ps)
const TIME_MATCH_EPS: f64 = 1e-9;

/// 在时间序列中定位样本，窗口边界必须与已有样本重合
fn sample_index(time: &[f64], t: f64) -> Result<usize> {
    time.iter()
        .position(|&ti| (ti - t).abs() < TIME_MATCH_EPS)
        .ok_or(ThermokError::WindowOutOfRange { bound: t })
}

/// 在窗口 `[t0, t1)` 内估算稳态热导率
///
/// 估算值为窗口内序列值的算术平均；斜率明显偏离零
/// 说明序列尚未进入平台，窗口应重新选取。
pub fn estimate_k(
    k: &ConductivitySeries,
    time: &[f64],
    t0: f64,
    t1: f64,
) -> Result<ConductivityEstimate> {
    if k.len() != time.len() {
        return Err(ThermokError::LengthMismatch {
            name: "time".to_string(),
            expected: k.len(),
            found: time.len(),
        });
    }

    let start = sample_index(time, t0)?;
    let end = sample_index(time, t1)?;
    if end <= start {
        return Err(ThermokError::EmptyWindow { t0, t1 });
    }

    let window = &k.values[start..end];
    let value = window.iter().sum::<f64>() / window.len() as f64;
    let slope = linregress_slope(&time[start..end], window);

    Ok(ConductivityEstimate { value, slope })
}

/// 最小二乘直线斜率，自变量无变化时为零
fn linregress_slope(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        cov += (xi - x_mean) * (yi - y_mean);
        var += (xi - x_mean).powi(2);
    }

    if var == 0.0 {
        0.0
    } else {
        cov / var
    }
}
