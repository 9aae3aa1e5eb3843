//! # 结果导出
//!
//! 将聚合结果压平为标签到标量/序列的映射，
//! 供外部报告工具以 YAML / CSV 交换。
//!
//! ## 依赖关系
//! - 被 `commands/analyze/conductivity.rs`, `commands/collect.rs` 调用
//! - 使用 `models/` 数据模型
//! - 使用 `serde_yaml` 与 `csv` 库写文件

use crate::error::{Result, ThermokError};
use crate::models::{ConductivitySeries, RunResult, TrialResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// 单个 trial 的汇总行
#[derive(Debug, Clone, Serialize)]
pub struct TrialSummary {
    /// trial 名称
    pub trial: String,

    /// 稳态热导率估算 (W/mK)
    pub k: f64,

    /// 各 run 估算值中的最大值
    pub max: f64,

    /// 各 run 估算值中的最小值
    pub min: f64,

    /// 各 run 估算值的总体标准差
    pub std: f64,

    /// 窗口内的平台斜率
    pub slope: f64,

    /// 从 run_info.yaml 取出的标注键值
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub info: BTreeMap<String, f64>,
}

/// 将 trial 平均视图压平为汇总行
///
/// `label` 选择汇总的方向标签（通常为 `iso`）。
/// 标注键从首个带有 run_info 的 run 读取。
pub fn trial_summary(
    trial: &TrialResult,
    label: &str,
    info_keys: &[String],
) -> Result<TrialSummary> {
    let avg = trial.avg.as_ref().ok_or_else(|| {
        ThermokError::NoData(format!("trial '{}' has no averaged view", trial.name))
    })?;
    let est = avg.k_est.get(label).ok_or_else(|| ThermokError::MissingDirection {
        run: trial.name.clone(),
        label: label.to_string(),
    })?;
    let stats = avg.stats.get(label).ok_or_else(|| ThermokError::MissingDirection {
        run: trial.name.clone(),
        label: label.to_string(),
    })?;

    let mut info = BTreeMap::new();
    if !info_keys.is_empty() {
        for run_name in &trial.runs {
            if let Some(run_info) = trial.data.get(run_name).and_then(|r| r.info.as_ref()) {
                for key in info_keys {
                    if let Some(value) = run_info.get_f64(key) {
                        info.insert(key.clone(), value);
                    }
                }
                break;
            }
        }
    }

    Ok(TrialSummary {
        trial: trial.name.clone(),
        k: est.value,
        max: stats.max,
        min: stats.min,
        std: stats.std,
        slope: est.slope,
        info,
    })
}

/// 单个 run 的标签到估算值映射
pub fn run_estimate_mapping(run: &RunResult) -> BTreeMap<String, f64> {
    run.k_est
        .iter()
        .map(|(label, est)| (label.clone(), est.value))
        .collect()
}

/// 汇总行写入 YAML 文件
pub fn write_summary_yaml(rows: &[TrialSummary], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ThermokError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::to_writer(file, rows)?;
    Ok(())
}

/// 汇总行写入 CSV 文件
///
/// 标注键取所有行键集合的并集，缺失值留空。
pub fn write_summary_csv(rows: &[TrialSummary], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut info_keys: Vec<String> = Vec::new();
    for row in rows {
        for key in row.info.keys() {
            if !info_keys.contains(key) {
                info_keys.push(key.clone());
            }
        }
    }
    info_keys.sort();

    let mut header = vec![
        "trial".to_string(),
        "k".to_string(),
        "max".to_string(),
        "min".to_string(),
        "std".to_string(),
        "slope".to_string(),
    ];
    header.extend(info_keys.iter().cloned());
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.trial.clone(),
            format!("{:.6}", row.k),
            format!("{:.6}", row.max),
            format!("{:.6}", row.min),
            format!("{:.6}", row.std),
            format!("{:.6}", row.slope),
        ];
        for key in &info_keys {
            record.push(
                row.info
                    .get(key)
                    .map(|v| format!("{}", v))
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| ThermokError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// 时间与若干标签序列写入 CSV 文件
///
/// 每列一个标签，与时间列按索引对齐。
pub fn write_series_csv(
    time: &[f64],
    series: &BTreeMap<String, ConductivitySeries>,
    path: &Path,
) -> Result<()> {
    for (label, s) in series {
        if s.len() != time.len() {
            return Err(ThermokError::LengthMismatch {
                name: label.clone(),
                expected: time.len(),
                found: s.len(),
            });
        }
    }

    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["time".to_string()];
    header.extend(series.keys().cloned());
    wtr.write_record(&header)?;

    for (i, t) in time.iter().enumerate() {
        let mut record = vec![format!("{:.6}", t)];
        for s in series.values() {
            record.push(format!("{:.6}", s.values[i]));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| ThermokError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
