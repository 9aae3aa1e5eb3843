//! # analyze 子命令 CLI 定义
//!
//! 分析功能统一入口，包含多个子命令：
//! - `conductivity`: Green-Kubo 热导率分析
//! - `distance`: 轨迹最小镜像距离诊断
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze/` 相应模块

use crate::models::{KParameters, ReadOptions};
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Analyze 主命令
// ─────────────────────────────────────────────────────────────

/// analyze 主命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub command: AnalyzeCommands,
}

/// analyze 子命令
#[derive(Subcommand, Debug)]
pub enum AnalyzeCommands {
    /// Green-Kubo thermal conductivity from heat-flux autocorrelation files
    Conductivity(ConductivityArgs),

    /// Minimum-image distance of framework atoms from a reference frame
    Distance(DistanceArgs),
}

// ─────────────────────────────────────────────────────────────
// 热导率分析子命令
// ─────────────────────────────────────────────────────────────

/// 分析范围：单个 run、一个 trial 或 trial 集合
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Scope {
    /// A single simulation run directory
    Run,
    /// A trial directory containing run subdirectories
    Trial,
    /// A directory containing trial subdirectories
    Set,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Run => write!(f, "run"),
            Scope::Trial => write!(f, "trial"),
            Scope::Set => write!(f, "set"),
        }
    }
}

/// Green-Kubo 计算参数（analyze 与 collect 共用）
#[derive(Args, Debug, Clone)]
pub struct KParArgs {
    /// Simulation cell volume in cubic Angstroms
    #[arg(long, default_value_t = 512000.0)]
    pub volume: f64,

    /// Temperature in Kelvin
    #[arg(long, default_value_t = 300.0)]
    pub temp: f64,

    /// Boltzmann constant in simulation units
    #[arg(long, default_value_t = 0.001987)]
    pub kb: f64,

    /// Unit conversion factor to W/mK
    #[arg(long, default_value_t = 69443.84)]
    pub conv: f64,

    /// Timestep in femtoseconds
    #[arg(long, default_value_t = 5.0)]
    pub dt: f64,

    /// Flux file name prefix; the direction label is the part between prefix and extension
    #[arg(long, default_value = "J0Jt_t")]
    pub prefix: String,

    /// Comma-separated contribution-term suffixes (an empty entry selects the total flux)
    #[arg(long, value_delimiter = ',', default_value = "")]
    pub terms: Vec<String>,

    /// Number of equilibration records to skip at the top of each flux file
    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Column index of the flux value in each record (0-based)
    #[arg(long, default_value_t = 3)]
    pub flux_column: usize,

    /// Start of the estimation window in ps
    #[arg(long, default_value_t = 5.0)]
    pub t0: f64,

    /// End of the estimation window in ps (exclusive)
    #[arg(long, default_value_t = 10.0)]
    pub t1: f64,

    /// Skip the isotropic average over x, y, z
    #[arg(long, default_value_t = false)]
    pub no_isotropic: bool,

    /// Skip the trial-level average over runs
    #[arg(long, default_value_t = false)]
    pub no_average: bool,

    /// Attach run_info.yaml metadata to each run
    #[arg(long, default_value_t = false)]
    pub read_info: bool,

    /// Attach thermo data from log.lammps to each run
    #[arg(long, default_value_t = false)]
    pub read_thermo: bool,
}

impl KParArgs {
    /// 转换为核心计算参数
    pub fn to_parameters(&self) -> KParameters {
        KParameters {
            kb: self.kb,
            conv: self.conv,
            dt: self.dt,
            volume: self.volume,
            temp: self.temp,
            prefix: self.prefix.clone(),
            terms: if self.terms.is_empty() {
                vec![String::new()]
            } else {
                self.terms.clone()
            },
            isotropic: !self.no_isotropic,
            average: !self.no_average,
            read_info: self.read_info,
            read_thermo: self.read_thermo,
        }
    }

    /// 转换为读取选项
    pub fn to_read_options(&self) -> ReadOptions {
        ReadOptions {
            skip: self.skip,
            flux_column: self.flux_column,
            t0: self.t0,
            t1: self.t1,
        }
    }
}

/// 热导率分析子命令参数
#[derive(Args, Debug)]
pub struct ConductivityArgs {
    /// Input directory: a run, a trial, or a set of trials depending on --scope
    pub input: PathBuf,

    /// What the input directory contains
    #[arg(long, value_enum, default_value = "run")]
    pub scope: Scope,

    #[command(flatten)]
    pub kpar: KParArgs,

    /// Number of parallel jobs for reading runs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Write conductivity series (run scope) or averaged series (trial scope) to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────
// 轨迹距离诊断子命令
// ─────────────────────────────────────────────────────────────

/// 轨迹距离诊断子命令参数
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// xyz trajectory file
    pub input: PathBuf,

    /// Orthorhombic cell edge lengths in Angstroms (e.g. "80,80,80")
    #[arg(long, value_delimiter = ',', required = true)]
    pub cell: Vec<f64>,

    /// Reference frame index for distance calculation
    #[arg(long, default_value_t = 0)]
    pub reference: usize,

    /// Write per-frame distance summary to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
