//! # 统一错误处理模块
//!
//! 定义 thermok 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// thermok 统一错误类型
#[derive(Error, Debug)]
pub enum ThermokError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Frame size mismatch in {path}: frame {frame} has {found} atoms, expected {expected}")]
    FrameSizeMismatch {
        path: String,
        frame: usize,
        expected: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 一致性错误
    // ─────────────────────────────────────────────────────────────
    #[error("Series length mismatch for '{name}': expected {expected}, found {found}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Run '{run}' is missing direction '{label}'")]
    MissingDirection { run: String, label: String },

    #[error("Invalid direction label: {0}")]
    InvalidDirection(String),

    #[error("No data to aggregate: {0}")]
    NoData(String),

    // ─────────────────────────────────────────────────────────────
    // 估算窗口错误
    // ─────────────────────────────────────────────────────────────
    #[error("Estimation window bound {bound} ps not found in time series")]
    WindowOutOfRange { bound: f64 },

    #[error("Empty estimation window: [{t0}, {t1})")]
    EmptyWindow { t0: f64, t1: f64 },

    // ─────────────────────────────────────────────────────────────
    // 轨迹形状错误
    // ─────────────────────────────────────────────────────────────
    #[error("Coordinates shape error (expected (n_frames, n_atoms, 3)): {reason}")]
    DimensionError { reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No flux file found with prefix '{prefix}' in: {path}")]
    FluxNotFound { prefix: String, path: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ThermokError>;
