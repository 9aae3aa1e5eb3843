//! # Lammps log 解析器
//!
//! 从 log.lammps 提取 thermo 输出表。
//! 每段 thermo 数据始于表头行，止于 `Loop time` 行，
//! 一个 log 可包含多段（如 NVT 与 NVE 阶段各一段）。
//!
//! ## 依赖关系
//! - 被 `batch/reader.rs` 使用
//! - 使用 `models/run.rs` 的 ThermoSection

use crate::error::{Result, ThermokError};
use crate::models::run::ThermoSection;
use std::fs;
use std::path::Path;

/// thermo 表头行的默认形式
pub const THERMO_HEADER: &str = "Step Temp Press PotEng TotEng Volume";

/// 读取 log 文件并提取所有 thermo 数据段
pub fn read_thermo_log(path: &Path, header: &str) -> Result<Vec<ThermoSection>> {
    let content = fs::read_to_string(path).map_err(|e| ThermokError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_thermo_content(&content, &path.display().to_string(), header)
}

/// 从 log 内容解析 thermo 数据段
///
/// 表头行的列名即映射键；数据行字段数不足表头列数时视为文件损坏。
pub fn parse_thermo_content(
    content: &str,
    name: &str,
    header: &str,
) -> Result<Vec<ThermoSection>> {
    let columns: Vec<&str> = header.split_whitespace().collect();
    let lines: Vec<&str> = content.lines().collect();

    let mut sections = Vec::new();
    let mut start: Option<usize> = None;
    for (line_no, line) in lines.iter().enumerate() {
        if line.contains(header) {
            start = Some(line_no + 1);
        } else if line.contains("Loop time") {
            if let Some(s) = start.take() {
                sections.push(parse_section(&lines[s..line_no], name, &columns, s)?);
            }
        }
    }

    Ok(sections)
}

/// 解析单段 thermo 数据行
fn parse_section(
    lines: &[&str],
    name: &str,
    columns: &[&str],
    offset: usize,
) -> Result<ThermoSection> {
    let mut section = ThermoSection::new();
    for col in columns {
        section.insert(col.to_string(), Vec::with_capacity(lines.len()));
    }

    for (i, line) in lines.iter().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < columns.len() {
            return Err(ThermokError::ParseError {
                format: "lammps-log".to_string(),
                path: name.to_string(),
                reason: format!(
                    "line {}: expected {} thermo fields, found {}",
                    offset + i + 1,
                    columns.len(),
                    fields.len()
                ),
            });
        }
        for (col, field) in columns.iter().zip(fields.iter()) {
            let value: f64 = field.parse().map_err(|_| ThermokError::ParseError {
                format: "lammps-log".to_string(),
                path: name.to_string(),
                reason: format!("line {}: invalid thermo value '{}'", offset + i + 1, field),
            })?;
            if let Some(values) = section.get_mut(*col) {
                values.push(value);
            }
        }
    }

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
units real
Step Temp Press PotEng TotEng Volume
0 300.0 1.0 -50.0 -45.0 512000.0
100 298.5 1.1 -50.2 -45.1 512000.0
Loop time of 12.3 on 4 procs
Step Temp Press PotEng TotEng Volume
0 301.0 0.9 -49.0 -44.0 512000.0
Loop time of 7.7 on 4 procs
";

    #[test]
    fn test_parse_two_sections() {
        let sections = parse_thermo_content(LOG, "log.lammps", THERMO_HEADER).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["Step"], vec![0.0, 100.0]);
        assert!((sections[0]["Temp"][1] - 298.5).abs() < 1e-12);
        assert_eq!(sections[1]["Temp"].len(), 1);
    }

    #[test]
    fn test_parse_no_sections() {
        let sections = parse_thermo_content("units real\n", "log.lammps", THERMO_HEADER).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_parse_bad_thermo_line() {
        let log = "Step Temp Press PotEng TotEng Volume\n0 300.0\nLoop time of 1 on 1 procs\n";
        assert!(parse_thermo_content(log, "log.lammps", THERMO_HEADER).is_err());
    }
}
