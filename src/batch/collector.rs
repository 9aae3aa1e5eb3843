//! # 目录与热流文件发现
//!
//! 扫描 run 目录发现热流文件并导出方向标签，
//! 以及枚举 trial / trial 集合的子目录。
//!
//! ## 标签约定
//! 文件名前缀与扩展名之间的子串即方向标签。
//! 例：前缀 `J0Jt_t` 时，`J0Jt_tx.dat` 的方向为 `x`，
//! `J0Jt_tx_bond.dat` 的方向为 `x_bond`。
//!
//! ## 依赖关系
//! - 被 `batch/reader.rs`, `commands/` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{Result, ThermokError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 从文件名导出方向标签，不匹配前缀时为 None
pub fn direction_label(file_name: &str, prefix: &str) -> Option<String> {
    if !file_name.starts_with(prefix) {
        return None;
    }
    let stem = file_name.split('.').next().unwrap_or(file_name);
    if stem.len() <= prefix.len() {
        return None;
    }
    Some(stem[prefix.len()..].to_string())
}

/// 扫描 run 目录，返回热流文件路径与方向标签
///
/// 未发现任何匹配文件时报错，错误中带上前缀与目录。
pub fn find_flux_files(run_dir: &Path, prefix: &str) -> Result<Vec<(PathBuf, String)>> {
    if !run_dir.is_dir() {
        return Err(ThermokError::DirectoryNotFound {
            path: run_dir.display().to_string(),
        });
    }

    let mut files: Vec<(PathBuf, String)> = WalkDir::new(run_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            direction_label(&name, prefix).map(|label| (e.path().to_path_buf(), label))
        })
        .collect();
    files.sort_by(|a, b| a.1.cmp(&b.1));

    if files.is_empty() {
        return Err(ThermokError::FluxNotFound {
            prefix: prefix.to_string(),
            path: run_dir.display().to_string(),
        });
    }
    Ok(files)
}

/// 枚举目录的一级子目录，按名称排序
pub fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ThermokError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut dirs: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path().to_path_buf())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// 路径末段作为 run / trial 名称
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_label() {
        assert_eq!(direction_label("J0Jt_tx.dat", "J0Jt_t"), Some("x".to_string()));
        assert_eq!(
            direction_label("J0Jt_tx_bond.dat", "J0Jt_t"),
            Some("x_bond".to_string())
        );
        assert_eq!(direction_label("log.lammps", "J0Jt_t"), None);
        assert_eq!(direction_label("J0Jt_t.dat", "J0Jt_t"), None);
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(dir_name(Path::new("/tmp/trials/Run1")), "Run1");
    }
}
