//! # 多方向 / 多 run 聚合
//!
//! run 级聚合：对每个方向积分与估算，按需求各向同性平均。
//! trial 级聚合：跨 run 逐点平均序列，并平均各 run 的标量估算值。
//!
//! 聚合只接受已解析好的标签到序列映射，不做任何目录扫描，
//! 文件发现由 `batch/` 层负责。
//!
//! ## 依赖关系
//! - 被 `batch/reader.rs`, `commands/` 调用
//! - 使用 `conductivity/integrator.rs`, `conductivity/estimator.rs`
//! - 使用 `models/` 数据模型

use crate::conductivity::{calculate_k, estimate_k};
use crate::error::{Result, ThermokError};
use crate::models::{
    Axis, ConductivityEstimate, ConductivitySeries, Direction, EstimateStats, FluxSeries,
    KParameters, ReadOptions, RunResult, TrialAverage,
};
use std::collections::BTreeMap;

/// 等长序列的逐点算术平均
///
/// 任一序列长度与首个不一致时报错，错误中带上该序列的标签。
pub fn average_series(series: &[(&str, &ConductivitySeries)]) -> Result<ConductivitySeries> {
    let (_, first) = series
        .first()
        .ok_or_else(|| ThermokError::NoData("no series to average".to_string()))?;
    let n = first.len();

    for (label, s) in series {
        if s.len() != n {
            return Err(ThermokError::LengthMismatch {
                name: label.to_string(),
                expected: n,
                found: s.len(),
            });
        }
    }

    let count = series.len() as f64;
    let mut values = vec![0.0; n];
    for (_, s) in series {
        for (acc, v) in values.iter_mut().zip(s.values.iter()) {
            *acc += v;
        }
    }
    for v in values.iter_mut() {
        *v /= count;
    }

    Ok(ConductivitySeries::new(values))
}

/// 单个 run 的热导率聚合
///
/// 输入为方向标签到热流序列的映射。每个方向独立积分与估算；
/// 开启各向同性平均时，每个分项的 x/y/z 三个方向缺一不可。
pub fn analyze_run(
    name: &str,
    flux: &BTreeMap<String, FluxSeries>,
    par: &KParameters,
    opts: &ReadOptions,
) -> Result<RunResult> {
    let (_, reference) = flux.iter().next().ok_or_else(|| {
        ThermokError::NoData(format!("run '{}' has no flux series", name))
    })?;
    let time = reference.time.clone();

    let mut directions = Vec::with_capacity(flux.len());
    for label in flux.keys() {
        directions.push(label.parse::<Direction>()?);
    }

    let mut k = BTreeMap::new();
    let mut k_est = BTreeMap::new();
    for (label, series) in flux {
        if series.len() != time.len() {
            return Err(ThermokError::LengthMismatch {
                name: format!("{}/{}", name, label),
                expected: time.len(),
                found: series.len(),
            });
        }
        let series_k = calculate_k(series, par)?;
        let est = estimate_k(&series_k, &time, opts.t0, opts.t1)?;
        k.insert(label.clone(), series_k);
        k_est.insert(label.clone(), est);
    }

    if par.isotropic {
        let mut iso_entries = Vec::new();
        for term in unique_terms(&directions) {
            let mut labeled: Vec<(String, &ConductivitySeries)> = Vec::with_capacity(3);
            for axis in Axis::all() {
                let label = Direction::new(axis, term.clone()).to_string();
                let series = k.get(&label).ok_or_else(|| ThermokError::MissingDirection {
                    run: name.to_string(),
                    label: label.clone(),
                })?;
                labeled.push((label, series));
            }
            let refs: Vec<(&str, &ConductivitySeries)> =
                labeled.iter().map(|(l, s)| (l.as_str(), *s)).collect();
            let iso = average_series(&refs)?;
            let est = estimate_k(&iso, &time, opts.t0, opts.t1)?;
            iso_entries.push((crate::models::run::iso_label(&term), iso, est));
        }
        for (label, series, est) in iso_entries {
            k.insert(label.clone(), series);
            k_est.insert(label, est);
        }
    }

    Ok(RunResult {
        name: name.to_string(),
        time,
        k,
        k_est,
        directions,
        info: None,
        thermo: None,
    })
}

/// trial 级跨 run 平均
///
/// 序列逐点平均；标量估算取各 run 估算值的算术平均，
/// 而非对平均后的序列重新估算。方向标签集以首个 run 为准。
pub fn average_trial(
    trial_name: &str,
    runs: &[String],
    data: &BTreeMap<String, RunResult>,
) -> Result<TrialAverage> {
    let first_name = runs.first().ok_or_else(|| {
        ThermokError::NoData(format!("trial '{}' has no runs", trial_name))
    })?;
    let first = data.get(first_name).ok_or_else(|| {
        ThermokError::NoData(format!("run '{}' missing from trial data", first_name))
    })?;

    let mut avg = TrialAverage {
        k: BTreeMap::new(),
        k_est: BTreeMap::new(),
        stats: BTreeMap::new(),
    };

    for label in first.k.keys() {
        let mut labeled: Vec<(&str, &ConductivitySeries)> = Vec::with_capacity(runs.len());
        let mut values = Vec::with_capacity(runs.len());
        let mut slopes = Vec::with_capacity(runs.len());

        for run_name in runs {
            let run = data.get(run_name).ok_or_else(|| {
                ThermokError::NoData(format!("run '{}' missing from trial data", run_name))
            })?;
            let series = run.k.get(label).ok_or_else(|| ThermokError::MissingDirection {
                run: run_name.clone(),
                label: label.clone(),
            })?;
            let est = run.k_est.get(label).ok_or_else(|| ThermokError::MissingDirection {
                run: run_name.clone(),
                label: label.clone(),
            })?;
            labeled.push((run_name.as_str(), series));
            values.push(est.value);
            slopes.push(est.slope);
        }

        let series = average_series(&labeled)?;
        let n = values.len() as f64;
        let est = ConductivityEstimate {
            value: values.iter().sum::<f64>() / n,
            slope: slopes.iter().sum::<f64>() / n,
        };
        if let Some(stats) = EstimateStats::from_estimates(&values) {
            avg.stats.insert(label.clone(), stats);
        }
        avg.k.insert(label.clone(), series);
        avg.k_est.insert(label.clone(), est);
    }

    Ok(avg)
}

/// 方向中出现的分项后缀，去重保序
fn unique_terms(directions: &[Direction]) -> Vec<String> {
    let mut terms = Vec::new();
    for d in directions {
        if !terms.contains(&d.term) {
            terms.push(d.term.clone());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_flux(len: usize, first: f64, dt: f64) -> FluxSeries {
        let time = (0..len).map(|i| i as f64 * dt / 1000.0).collect();
        let mut flux = vec![0.0; len];
        flux[0] = first;
        FluxSeries::new(time, flux).unwrap()
    }

    fn test_options(len: usize, dt: f64) -> ReadOptions {
        // 窗口取序列后半段的两个真实样本
        ReadOptions {
            skip: 0,
            flux_column: 3,
            t0: (len / 2) as f64 * dt / 1000.0,
            t1: (len - 1) as f64 * dt / 1000.0,
        }
    }

    #[test]
    fn test_average_series_elementwise_mean() {
        let a = ConductivitySeries::new(vec![1.0, 2.0, 3.0]);
        let b = ConductivitySeries::new(vec![3.0, 4.0, 5.0]);
        let avg = average_series(&[("a", &a), ("b", &b)]).unwrap();
        assert_eq!(avg.values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_average_series_length_mismatch_names_offender() {
        let a = ConductivitySeries::new(vec![0.0; 100]);
        let b = ConductivitySeries::new(vec![0.0; 101]);
        let err = average_series(&[("Run1", &a), ("Run2", &b)]).unwrap_err();
        match err {
            ThermokError::LengthMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "Run2");
                assert_eq!(expected, 100);
                assert_eq!(found, 101);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_analyze_run_isotropic() {
        let par = KParameters::default();
        let opts = test_options(20, par.dt);

        let mut flux = BTreeMap::new();
        flux.insert("x".to_string(), constant_flux(20, 2.0, par.dt));
        flux.insert("y".to_string(), constant_flux(20, 4.0, par.dt));
        flux.insert("z".to_string(), constant_flux(20, 6.0, par.dt));

        let run = analyze_run("Run1", &flux, &par, &opts).unwrap();
        assert_eq!(run.directions.len(), 3);
        assert!(run.k.contains_key("iso"));
        assert!(run.k_est.contains_key("iso"));

        // 三个方向的序列恒定，各向同性平均等于方向估算的平均
        let x = run.k_est["x"].value;
        let y = run.k_est["y"].value;
        let z = run.k_est["z"].value;
        let iso = run.k_est["iso"].value;
        assert!((iso - (x + y + z) / 3.0).abs() < iso.abs() * 1e-12);
    }

    #[test]
    fn test_analyze_run_missing_axis() {
        let par = KParameters::default();
        let opts = test_options(20, par.dt);

        let mut flux = BTreeMap::new();
        flux.insert("x".to_string(), constant_flux(20, 2.0, par.dt));
        flux.insert("y".to_string(), constant_flux(20, 4.0, par.dt));

        let err = analyze_run("Run1", &flux, &par, &opts).unwrap_err();
        match err {
            ThermokError::MissingDirection { run, label } => {
                assert_eq!(run, "Run1");
                assert_eq!(label, "z");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_analyze_run_anisotropic_skips_iso() {
        let par = KParameters {
            isotropic: false,
            ..KParameters::default()
        };
        let opts = test_options(20, par.dt);

        let mut flux = BTreeMap::new();
        flux.insert("x".to_string(), constant_flux(20, 2.0, par.dt));

        let run = analyze_run("Run1", &flux, &par, &opts).unwrap();
        assert!(!run.k.contains_key("iso"));
        assert_eq!(run.k.len(), 1);
    }

    #[test]
    fn test_analyze_run_contribution_terms() {
        let par = KParameters {
            terms: vec![String::new(), "_bond".to_string()],
            ..KParameters::default()
        };
        let opts = test_options(20, par.dt);

        let mut flux = BTreeMap::new();
        for axis in ["x", "y", "z"] {
            flux.insert(axis.to_string(), constant_flux(20, 2.0, par.dt));
            flux.insert(format!("{}_bond", axis), constant_flux(20, 1.0, par.dt));
        }

        let run = analyze_run("Run1", &flux, &par, &opts).unwrap();
        assert!(run.k.contains_key("iso"));
        assert!(run.k.contains_key("iso_bond"));
        assert_eq!(run.terms(), vec![String::new(), "_bond".to_string()]);
    }

    #[test]
    fn test_average_trial() {
        let par = KParameters {
            isotropic: false,
            ..KParameters::default()
        };
        let opts = test_options(20, par.dt);

        let mut data = BTreeMap::new();
        for (name, first) in [("Run1", 2.0), ("Run2", 4.0)] {
            let mut flux = BTreeMap::new();
            flux.insert("x".to_string(), constant_flux(20, first, par.dt));
            data.insert(name.to_string(), analyze_run(name, &flux, &par, &opts).unwrap());
        }
        let runs = vec!["Run1".to_string(), "Run2".to_string()];

        let avg = average_trial("trial", &runs, &data).unwrap();
        let e1 = data["Run1"].k_est["x"].value;
        let e2 = data["Run2"].k_est["x"].value;

        // 标量估算为各 run 估算的平均
        assert!((avg.k_est["x"].value - (e1 + e2) / 2.0).abs() < 1e-9);
        // 序列逐点平均
        for i in 0..20 {
            let expected = (data["Run1"].k["x"].values[i] + data["Run2"].k["x"].values[i]) / 2.0;
            assert!((avg.k["x"].values[i] - expected).abs() < expected.abs() * 1e-12);
        }
        // 离散统计来自各 run 估算值
        let stats = &avg.stats["x"];
        assert!((stats.max - e1.max(e2)).abs() < 1e-9);
        assert!((stats.min - e1.min(e2)).abs() < 1e-9);
    }

    #[test]
    fn test_average_trial_length_mismatch() {
        let par = KParameters {
            isotropic: false,
            ..KParameters::default()
        };

        let mut data = BTreeMap::new();
        for (name, len) in [("Run1", 100usize), ("Run2", 101usize)] {
            let opts = test_options(len, par.dt);
            let mut flux = BTreeMap::new();
            flux.insert("x".to_string(), constant_flux(len, 2.0, par.dt));
            data.insert(name.to_string(), analyze_run(name, &flux, &par, &opts).unwrap());
        }
        let runs = vec!["Run1".to_string(), "Run2".to_string()];

        let err = average_trial("trial", &runs, &data).unwrap_err();
        match err {
            ThermokError::LengthMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "Run2");
                assert_eq!(expected, 100);
                assert_eq!(found, 101);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_average_trial_no_runs() {
        let data = BTreeMap::new();
        assert!(average_trial("trial", &[], &data).is_err());
    }
}
