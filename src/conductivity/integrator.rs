//! # Green-Kubo 积分器
//!
//! 将热流自相关序列累积积分为热导率序列。
//!
//! ## 算法概述
//! Green-Kubo 关系下，热导率是热流自相关函数的累积积分：
//! 每个样本按 `volume * dt / (kb * temp²) * conv` 缩放后累加。
//! 相关原点取梯形修正，首个输出为零滞后项缩放值的一半，
//! 不减半会使原点项重复计入，得到约两倍的热导率。
//!
//! ## 依赖关系
//! - 被 `conductivity/aggregate.rs` 调用
//! - 使用 `models/series.rs`, `models/config.rs`

use crate::error::{Result, ThermokError};
use crate::models::{ConductivitySeries, FluxSeries, KParameters};

/// 由热流自相关序列计算累积热导率序列 (W/mK)
///
/// 输出与输入等长。纯函数，无 I/O。
pub fn calculate_k(flux: &FluxSeries, par: &KParameters) -> Result<ConductivitySeries> {
    if flux.is_empty() {
        return Err(ThermokError::NoData("flux series is empty".to_string()));
    }

    let scale = par.volume * par.dt / (par.kb * par.temp.powi(2)) * par.conv;

    let mut values = Vec::with_capacity(flux.len());
    // 相关原点的梯形修正：零滞后项计半
    let mut k = flux.flux[0] / 2.0 * scale;
    values.push(k);
    // 逐项累加，保持与数据相同的求和顺序
    for &j in &flux.flux[1..] {
        k += j * scale;
        values.push(k);
    }

    Ok(ConductivitySeries::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flux_series(flux: Vec<f64>, dt: f64) -> FluxSeries {
        let time = (0..flux.len()).map(|i| i as f64 * dt / 1000.0).collect();
        FluxSeries::new(time, flux).unwrap()
    }

    #[test]
    fn test_first_sample_is_half_origin() {
        let par = KParameters::default();
        let flux = flux_series(vec![4.0, 0.0], par.dt);
        let k = calculate_k(&flux, &par).unwrap();

        let scale = par.volume * par.dt / (par.kb * par.temp.powi(2)) * par.conv;
        assert!((k.values[0] - 2.0 * scale).abs() < k.values[0].abs() * 1e-12);
        // 后续热流为零，序列保持恒定
        assert!((k.values[1] - k.values[0]).abs() < k.values[0].abs() * 1e-12);
    }

    #[test]
    fn test_reference_integration_case() {
        let par = KParameters {
            volume: 512000.0,
            temp: 300.0,
            kb: 0.001987,
            conv: 69443.84,
            dt: 5.0,
            ..KParameters::default()
        };
        let mut flux = vec![0.0; 10];
        flux[0] = 2.0;
        let series = flux_series(flux, par.dt);
        let k = calculate_k(&series, &par).unwrap();

        let expected = 2.0 / 2.0 * 512000.0 * 5.0 / (0.001987 * 300.0f64.powi(2)) * 69443.84;
        assert_eq!(k.len(), 10);
        assert!((k.values[0] - expected).abs() < expected * 1e-12);
        for value in &k.values {
            assert!((value - expected).abs() < expected * 1e-12);
        }
    }

    #[test]
    fn test_integration_from_parsed_file() {
        use crate::parsers::flux::parse_flux_content;

        // 5 条平衡段记录后接 10 条数据记录，第 3 列为热流
        let mut content = String::new();
        for i in 1..=5 {
            content.push_str(&format!("{} 9.9 9.9 9.9\n", i));
        }
        for i in 1..=10 {
            let flux = if i == 1 { 2.0 } else { 0.0 };
            content.push_str(&format!("{} 0.0 0.0 {}\n", i, flux));
        }

        let par = KParameters::default();
        let series = parse_flux_content(&content, "J0Jt_tx.dat", 5, 3, par.dt).unwrap();
        let k = calculate_k(&series, &par).unwrap();

        let expected = 2.0 / 2.0 * 512000.0 * 5.0 / (0.001987 * 300.0f64.powi(2)) * 69443.84;
        assert_eq!(k.len(), 10);
        for value in &k.values {
            assert!((value - expected).abs() < expected * 1e-12);
        }
    }

    #[test]
    fn test_monotonic_for_positive_flux() {
        let par = KParameters::default();
        let flux = flux_series(vec![1.0, 0.5, 0.25, 0.125, 0.0625], par.dt);
        let k = calculate_k(&flux, &par).unwrap();

        assert_eq!(k.len(), 5);
        for pair in k.values.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_empty_flux_rejected() {
        let par = KParameters::default();
        let flux = FluxSeries::new(vec![], vec![]).unwrap();
        assert!(calculate_k(&flux, &par).is_err());
    }
}
