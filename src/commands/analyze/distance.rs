//! # 轨迹距离诊断子命令实现
//!
//! 读取 xyz 轨迹，计算每个原子相对参考帧的最小镜像距离，
//! 汇报逐帧统计以诊断骨架刚性，按需导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `trajectory/pbc.rs`, `trajectory/displacement.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::analyze::DistanceArgs;
use crate::error::{Result, ThermokError};
use crate::parsers::xyz;
use crate::trajectory::displacement;
use crate::trajectory::pbc::{distance_from_reference, PbcCell};
use crate::utils::{output, progress};

use std::path::Path;

/// 执行轨迹距离诊断
pub fn execute(args: DistanceArgs) -> Result<()> {
    output::print_header("Framework Distance Analysis");

    if !args.input.exists() {
        return Err(ThermokError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }
    if args.cell.len() != 3 {
        return Err(ThermokError::InvalidArgument(format!(
            "--cell expects 3 edge lengths, got {}",
            args.cell.len()
        )));
    }
    let cell = PbcCell::new([args.cell[0], args.cell[1], args.cell[2]])?;

    let pb = progress::create_spinner("Reading trajectory");
    let parsed = xyz::read_trajectory(&args.input);
    pb.finish_and_clear();
    let traj = parsed?;

    output::print_info(&format!(
        "{} frames, {} atoms per frame",
        traj.n_frames(),
        traj.n_atoms()
    ));

    let distances = distance_from_reference(&traj, &cell, args.reference)?;

    // 逐帧均值与最大偏移
    let mut frame_stats = Vec::with_capacity(distances.len());
    let mut overall_max = 0.0f64;
    let mut overall_max_frame = 0;
    let mut overall_max_atom = 0;
    for (frame_idx, row) in distances.iter().enumerate() {
        let mean = row.iter().sum::<f64>() / row.len() as f64;
        let mut max = 0.0f64;
        for (atom_idx, &d) in row.iter().enumerate() {
            if d > max {
                max = d;
            }
            if d > overall_max {
                overall_max = d;
                overall_max_frame = frame_idx;
                overall_max_atom = atom_idx;
            }
        }
        frame_stats.push((mean, max));
    }

    let grand_mean =
        frame_stats.iter().map(|(mean, _)| mean).sum::<f64>() / frame_stats.len() as f64;
    output::print_info(&format!(
        "Mean displacement from frame {}: {:.4} A",
        args.reference, grand_mean
    ));
    output::print_info(&format!(
        "Largest excursion: {:.4} A (atom {} at frame {})",
        overall_max, overall_max_atom, overall_max_frame
    ));

    // 最大偏移原子的逐轴时间平均位移
    let atom_coords: Vec<[f64; 3]> = traj
        .frames
        .iter()
        .map(|f| f.coordinates[overall_max_atom])
        .collect();
    let drift = displacement::time_avg_displacement(&atom_coords, true, args.reference)?;
    output::print_info(&format!(
        "Atom {} mean drift per axis: {:.4} {:.4} {:.4} A",
        overall_max_atom, drift[0], drift[1], drift[2]
    ));

    if let Some(out) = &args.output {
        write_distance_csv(&traj, &frame_stats, out)?;
        output::print_success(&format!("Per-frame distances saved to '{}'", out.display()));
    }

    output::print_done("Analysis finished.");
    Ok(())
}

/// 逐帧统计写入 CSV
fn write_distance_csv(
    traj: &crate::models::Trajectory,
    frame_stats: &[(f64, f64)],
    path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["frame", "timestep", "mean_distance", "max_distance"])?;
    for (frame_idx, (mean, max)) in frame_stats.iter().enumerate() {
        wtr.write_record(&[
            frame_idx.to_string(),
            traj.frames[frame_idx].timestep.to_string(),
            format!("{:.6}", mean),
            format!("{:.6}", max),
        ])?;
    }
    wtr.flush().map_err(|e| ThermokError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
