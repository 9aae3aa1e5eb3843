//! # collect 命令实现
//!
//! 扫描 trial 集合目录，逐 trial 计算热导率估算与
//! 跨 run 离散统计，汇总导出 YAML / CSV。
//! 单个 trial 失败只跳过该 trial，不中断收集。
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `batch/reader.rs`, `batch/collector.rs`
//! - 使用 `conductivity/export.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{collector, reader};
use crate::cli::collect::CollectArgs;
use crate::conductivity::export::{self, TrialSummary};
use crate::error::{Result, ThermokError};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Trial")]
    trial: String,
    #[tabled(rename = "k (W/mK)")]
    k: String,
    #[tabled(rename = "Std")]
    std: String,
    #[tabled(rename = "Slope (W/mK·ps)")]
    slope: String,
}

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    output::print_header("Collecting Thermal Conductivity Results");

    if !args.set_dir.exists() {
        return Err(ThermokError::DirectoryNotFound {
            path: args.set_dir.display().to_string(),
        });
    }

    let mut par = args.kpar.to_parameters();
    // 标注键来自 run_info.yaml，收集时强制读取
    if !args.info_keys.is_empty() {
        par.read_info = true;
    }
    par.validate()?;
    let opts = args.kpar.to_read_options();
    opts.validate()?;

    let trial_dirs = collector::list_subdirs(&args.set_dir)?;
    if trial_dirs.is_empty() {
        output::print_warning("No trial directories found.");
        return Ok(());
    }
    output::print_info(&format!("{} trials found", trial_dirs.len()));

    let mut rows: Vec<TrialSummary> = Vec::new();
    for (index, trial_dir) in trial_dirs.iter().enumerate() {
        let trial_name = collector::dir_name(trial_dir);
        output::print_info(&format!(
            "{} / {} | {}",
            index + 1,
            trial_dirs.len(),
            trial_name
        ));

        match reader::read_trial(trial_dir, &par, &opts, args.jobs) {
            Ok((trial, failures)) => {
                for (run, reason) in &failures {
                    output::print_warning(&format!("Run '{}' failed: {}", run, reason));
                }
                match export::trial_summary(&trial, &args.label, &args.info_keys) {
                    Ok(row) => {
                        println!(
                            "    k: {:.3} W/mK | std: {:.3} | max: {:.3} | min: {:.3}",
                            row.k, row.std, row.max, row.min
                        );
                        rows.push(row);
                    }
                    Err(e) => {
                        output::print_warning(&format!("Skipping '{}': {}", trial_name, e))
                    }
                }
            }
            Err(e) => output::print_warning(&format!("Skipping '{}': {}", trial_name, e)),
        }
    }

    if rows.is_empty() {
        output::print_warning("No trial produced a usable estimate.");
        return Ok(());
    }

    export::write_summary_yaml(&rows, &args.output)?;
    output::print_success(&format!("Results saved to '{}'", args.output.display()));

    if let Some(csv_path) = &args.output_csv {
        export::write_summary_csv(&rows, csv_path)?;
        output::print_success(&format!("CSV table saved to '{}'", csv_path.display()));
    }

    let table_rows: Vec<SummaryRow> = rows
        .iter()
        .map(|row| SummaryRow {
            trial: row.trial.clone(),
            k: format!("{:.3}", row.k),
            std: format!("{:.3}", row.std),
            slope: format!("{:.5}", row.slope),
        })
        .collect();
    println!("{}", Table::new(&table_rows));

    output::print_done(&format!("Collected {} trials.", rows.len()));
    Ok(())
}
