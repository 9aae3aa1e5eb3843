//! # 热流自相关文件解析器
//!
//! 解析 Lammps 输出的热流自相关时间序列文件。
//!
//! ## 文件格式说明
//! ```text
//! index elem1 elem2 flux ...   # 空白分隔记录
//! ```
//! 首字段为 1 起始的相关函数序号，热流值所在列可配置。
//! 文件开头可配置跳过若干平衡段记录。
//! 样本时间 = (index - 1) * dt / 1000，将 fs 时间步换算为 ps。
//!
//! ## 依赖关系
//! - 被 `batch/reader.rs` 使用
//! - 使用 `models/series.rs`

use crate::error::{Result, ThermokError};
use crate::models::FluxSeries;
use std::fs;
use std::path::Path;

/// 读取热流自相关文件
pub fn read_thermal_flux(
    path: &Path,
    skip: usize,
    flux_column: usize,
    dt: f64,
) -> Result<FluxSeries> {
    let content = fs::read_to_string(path).map_err(|e| ThermokError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_flux_content(&content, &path.display().to_string(), skip, flux_column, dt)
}

/// 从字符串内容解析热流自相关序列
///
/// 字段数不足 `flux_column + 1` 的记录视为文件损坏。
pub fn parse_flux_content(
    content: &str,
    name: &str,
    skip: usize,
    flux_column: usize,
    dt: f64,
) -> Result<FluxSeries> {
    let mut time = Vec::new();
    let mut flux = Vec::new();

    for (line_no, line) in content.lines().enumerate().skip(skip) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= flux_column {
            return Err(ThermokError::ParseError {
                format: "flux".to_string(),
                path: name.to_string(),
                reason: format!(
                    "line {}: expected at least {} fields, found {}",
                    line_no + 1,
                    flux_column + 1,
                    fields.len()
                ),
            });
        }

        let index: f64 = fields[0].parse().map_err(|_| ThermokError::ParseError {
            format: "flux".to_string(),
            path: name.to_string(),
            reason: format!("line {}: invalid correlation index '{}'", line_no + 1, fields[0]),
        })?;
        let value: f64 = fields[flux_column]
            .parse()
            .map_err(|_| ThermokError::ParseError {
                format: "flux".to_string(),
                path: name.to_string(),
                reason: format!(
                    "line {}: invalid flux value '{}'",
                    line_no + 1,
                    fields[flux_column]
                ),
            })?;

        time.push((index - 1.0) * dt / 1000.0);
        flux.push(value);
    }

    if flux.is_empty() {
        return Err(ThermokError::ParseError {
            format: "flux".to_string(),
            path: name.to_string(),
            reason: format!("no data records after skipping {} lines", skip),
        });
    }

    FluxSeries::new(time, flux)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flux_basic() {
        let content = "1 0.0 0.0 2.5\n2 0.0 0.0 1.5\n3 0.0 0.0 0.5\n";
        let series = parse_flux_content(content, "J0Jt_tx.dat", 0, 3, 5.0).unwrap();
        assert_eq!(series.len(), 3);
        assert!((series.time[0] - 0.0).abs() < 1e-12);
        assert!((series.time[1] - 0.005).abs() < 1e-12);
        assert!((series.flux[0] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_parse_flux_skips_equilibration() {
        let mut content = String::new();
        for i in 1..=5 {
            content.push_str(&format!("{} 9.9 9.9 9.9\n", i));
        }
        for i in 1..=10 {
            let flux = if i == 1 { 2.0 } else { 0.0 };
            content.push_str(&format!("{} 0.0 0.0 {}\n", i, flux));
        }
        let series = parse_flux_content(&content, "flux", 5, 3, 5.0).unwrap();
        assert_eq!(series.len(), 10);
        assert!((series.flux[0] - 2.0).abs() < 1e-12);
        assert!((series.flux[9] - 0.0).abs() < 1e-12);
        assert!((series.time[0] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_flux_short_record() {
        let content = "1 0.0 0.0 2.5\n2 0.0\n";
        let err = parse_flux_content(content, "flux", 0, 3, 5.0).unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_parse_flux_empty_after_skip() {
        let content = "1 0.0 0.0 2.5\n";
        assert!(parse_flux_content(content, "flux", 5, 3, 5.0).is_err());
    }

    #[test]
    fn test_parse_flux_bad_number() {
        let content = "1 0.0 0.0 abc\n";
        assert!(parse_flux_content(content, "flux", 0, 3, 5.0).is_err());
    }
}
