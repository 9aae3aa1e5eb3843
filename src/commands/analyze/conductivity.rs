//! # 热导率分析子命令实现
//!
//! 按范围（run / trial / set）读取热流数据，计算 Green-Kubo
//! 热导率并以终端表格汇报，按需导出序列 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `batch/reader.rs`, `batch/collector.rs`
//! - 使用 `conductivity/export.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{collector, reader};
use crate::cli::analyze::{ConductivityArgs, Scope};
use crate::conductivity::export;
use crate::error::{Result, ThermokError};
use crate::models::{RunResult, TrialResult};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 单方向估算结果行
#[derive(Debug, Clone, Tabled)]
struct EstimateRow {
    #[tabled(rename = "Run")]
    run: String,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "k (W/mK)")]
    k: String,
    #[tabled(rename = "Slope (W/mK·ps)")]
    slope: String,
}

/// trial 平均结果行
#[derive(Debug, Clone, Tabled)]
struct AverageRow {
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "k (W/mK)")]
    k: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Std")]
    std: String,
}

/// 执行热导率分析
pub fn execute(args: ConductivityArgs) -> Result<()> {
    output::print_header("Green-Kubo Thermal Conductivity");

    if !args.input.exists() {
        return Err(ThermokError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    let par = args.kpar.to_parameters();
    par.validate()?;
    let opts = args.kpar.to_read_options();
    opts.validate()?;

    output::print_info(&format!(
        "Scope '{}', estimation window [{}, {}) ps, prefix '{}'",
        args.scope, opts.t0, opts.t1, par.prefix
    ));

    match args.scope {
        Scope::Run => {
            let run = reader::read_run(&args.input, &par, &opts)?;
            output::print_info(&format!(
                "{} directions found in '{}'",
                run.directions.len(),
                run.name
            ));
            print_run_table(&run);

            if let Some(out) = &args.output {
                export::write_series_csv(&run.time, &run.k, out)?;
                output::print_success(&format!(
                    "Conductivity series saved to '{}'",
                    out.display()
                ));
            }
        }
        Scope::Trial => {
            let (trial, failures) = reader::read_trial(&args.input, &par, &opts, args.jobs)?;
            report_failures(&failures);
            print_trial_tables(&trial);

            if let Some(out) = &args.output {
                if let Some(avg) = &trial.avg {
                    let time = trial
                        .runs
                        .first()
                        .and_then(|r| trial.data.get(r))
                        .map(|r| r.time.as_slice())
                        .unwrap_or(&[]);
                    export::write_series_csv(time, &avg.k, out)?;
                    output::print_success(&format!(
                        "Averaged conductivity series saved to '{}'",
                        out.display()
                    ));
                } else {
                    output::print_warning(
                        "No averaged view to export, rerun without --no-average.",
                    );
                }
            }
        }
        Scope::Set => {
            let trial_dirs = collector::list_subdirs(&args.input)?;
            if trial_dirs.is_empty() {
                output::print_warning("No trial directories found.");
                return Ok(());
            }
            output::print_info(&format!("{} trials found", trial_dirs.len()));

            for trial_dir in &trial_dirs {
                output::print_separator();
                output::print_info(&format!("Trial '{}'", collector::dir_name(trial_dir)));
                match reader::read_trial(trial_dir, &par, &opts, args.jobs) {
                    Ok((trial, failures)) => {
                        report_failures(&failures);
                        print_trial_tables(&trial);
                    }
                    Err(e) => {
                        output::print_warning(&format!(
                            "Skipping '{}': {}",
                            collector::dir_name(trial_dir),
                            e
                        ));
                    }
                }
            }
        }
    }

    output::print_done("Analysis finished.");
    Ok(())
}

/// 汇报失败的 run，失败不影响其余 run 的聚合
fn report_failures(failures: &[(String, String)]) {
    for (run, reason) in failures {
        output::print_warning(&format!("Run '{}' failed: {}", run, reason));
    }
}

/// 打印单个 run 的估算表
fn print_run_table(run: &RunResult) {
    let rows: Vec<EstimateRow> = run
        .k_est
        .iter()
        .map(|(label, est)| EstimateRow {
            run: run.name.clone(),
            direction: label.clone(),
            k: format!("{:.3}", est.value),
            slope: format!("{:.5}", est.slope),
        })
        .collect();
    println!("{}", Table::new(&rows));
}

/// 打印 trial 的逐 run 估算表与平均表
fn print_trial_tables(trial: &TrialResult) {
    let mut rows: Vec<EstimateRow> = Vec::new();
    for run_name in &trial.runs {
        if let Some(run) = trial.data.get(run_name) {
            for (label, est) in &run.k_est {
                rows.push(EstimateRow {
                    run: run_name.clone(),
                    direction: label.clone(),
                    k: format!("{:.3}", est.value),
                    slope: format!("{:.5}", est.slope),
                });
            }
        }
    }
    println!("{}", Table::new(&rows));

    if let Some(avg) = &trial.avg {
        let avg_rows: Vec<AverageRow> = avg
            .k_est
            .iter()
            .map(|(label, est)| {
                let stats = avg.stats.get(label);
                AverageRow {
                    direction: label.clone(),
                    k: format!("{:.3}", est.value),
                    max: stats.map(|s| format!("{:.3}", s.max)).unwrap_or_default(),
                    min: stats.map(|s| format!("{:.3}", s.min)).unwrap_or_default(),
                    std: stats.map(|s| format!("{:.3}", s.std)).unwrap_or_default(),
                }
            })
            .collect();
        output::print_info(&format!(
            "Average over {} runs ({})",
            trial.runs.len(),
            trial.name
        ));
        println!("{}", Table::new(&avg_rows));
    }
}
