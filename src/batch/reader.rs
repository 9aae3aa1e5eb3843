//! # run / trial 读取编排
//!
//! 把目录结构解析为核心可消费的输入并调用聚合：
//! 单个 run 的热流文件发现与读取，trial 下多个 run 的
//! 并行读取与跨 run 平均。
//!
//! ## 依赖关系
//! - 被 `commands/analyze/conductivity.rs`, `commands/collect.rs` 调用
//! - 使用 `batch/collector.rs`, `batch/runner.rs`
//! - 使用 `parsers/`, `conductivity/aggregate.rs`

use crate::batch::collector;
use crate::batch::runner::BatchRunner;
use crate::conductivity::aggregate;
use crate::error::{Result, ThermokError};
use crate::models::{Direction, FluxSeries, KParameters, ReadOptions, RunResult, TrialResult};
use crate::parsers::{flux, lammps_log, run_info};

use std::collections::BTreeMap;
use std::path::Path;

/// 读取并聚合单个 run 目录
///
/// 发现的方向标签必须合法；标签分项不在配置的 terms 内的
/// 文件被忽略。过滤后无剩余文件时视同未发现热流数据。
pub fn read_run(run_dir: &Path, par: &KParameters, opts: &ReadOptions) -> Result<RunResult> {
    let name = collector::dir_name(run_dir);
    let files = collector::find_flux_files(run_dir, &par.prefix)?;

    let mut flux_map: BTreeMap<String, FluxSeries> = BTreeMap::new();
    for (path, label) in files {
        let direction: Direction = label.parse()?;
        if !par.terms.contains(&direction.term) {
            continue;
        }
        let series = flux::read_thermal_flux(&path, opts.skip, opts.flux_column, par.dt)?;
        flux_map.insert(label, series);
    }
    if flux_map.is_empty() {
        return Err(ThermokError::FluxNotFound {
            prefix: par.prefix.clone(),
            path: run_dir.display().to_string(),
        });
    }

    let mut run = aggregate::analyze_run(&name, &flux_map, par, opts)?;
    if par.read_info {
        run.info = Some(run_info::read_run_info(run_dir)?);
    }
    if par.read_thermo {
        let log_path = run_dir.join("log.lammps");
        run.thermo = Some(lammps_log::read_thermo_log(
            &log_path,
            lammps_log::THERMO_HEADER,
        )?);
    }
    Ok(run)
}

/// 读取 trial 目录下的全部 run 并做跨 run 平均
///
/// 各 run 并行读取，单个 run 失败不影响其余 run，
/// 失败项以 (run 名, 错误信息) 返回给调用方决定取舍。
/// 平均阶段的一致性错误（长度不一致等）原样上抛。
pub fn read_trial(
    trial_dir: &Path,
    par: &KParameters,
    opts: &ReadOptions,
    jobs: usize,
) -> Result<(TrialResult, Vec<(String, String)>)> {
    let name = collector::dir_name(trial_dir);
    let run_dirs = collector::list_subdirs(trial_dir)?;
    if run_dirs.is_empty() {
        return Err(ThermokError::NoData(format!(
            "no run directories in {}",
            trial_dir.display()
        )));
    }

    let runner = BatchRunner::new(jobs);
    let results = runner.run(&run_dirs, "Reading runs", |dir| read_run(dir, par, opts));

    let mut runs = Vec::new();
    let mut data = BTreeMap::new();
    let mut failures = Vec::new();
    for (path, result) in results {
        let run_name = collector::dir_name(&path);
        match result {
            Ok(run) => {
                runs.push(run_name.clone());
                data.insert(run_name, run);
            }
            Err(e) => failures.push((run_name, e.to_string())),
        }
    }
    if data.is_empty() {
        return Err(ThermokError::NoData(format!(
            "all runs failed in {}",
            trial_dir.display()
        )));
    }

    let avg = if par.average {
        Some(aggregate::average_trial(&name, &runs, &data)?)
    } else {
        None
    };

    Ok((
        TrialResult {
            name,
            runs,
            data,
            avg,
        },
        failures,
    ))
}
