//! # 周期性边界条件几何
//!
//! 正交单胞内的最小镜像约定位移与距离计算。
//! 仅支持正交单胞，三个轴向边长独立。
//!
//! ## 依赖关系
//! - 被 `commands/analyze/distance.rs` 调用
//! - 使用 `models/trajectory.rs`

use crate::error::{Result, ThermokError};
use crate::models::Trajectory;

/// 正交周期单胞，三个轴向边长 (Å)
#[derive(Debug, Clone, Copy)]
pub struct PbcCell {
    pub edges: [f64; 3],
}

impl PbcCell {
    /// 创建单胞，边长必须为正
    pub fn new(edges: [f64; 3]) -> Result<Self> {
        for (i, &edge) in edges.iter().enumerate() {
            if edge <= 0.0 {
                return Err(ThermokError::InvalidArgument(format!(
                    "cell edge {} must be positive, got {}",
                    i, edge
                )));
            }
        }
        Ok(PbcCell { edges })
    }

    /// `from` 到 `to` 的最小镜像位移
    ///
    /// 逐轴取原始差值，超过半边长减去一个边长，
    /// 不大于负半边长加上一个边长。
    pub fn displacement(&self, from: &[f64; 3], to: &[f64; 3]) -> [f64; 3] {
        let mut d = [0.0; 3];
        for i in 0..3 {
            d[i] = to[i] - from[i];
            if d[i] > self.edges[i] * 0.5 {
                d[i] -= self.edges[i];
            } else if d[i] <= -self.edges[i] * 0.5 {
                d[i] += self.edges[i];
            }
        }
        d
    }

    /// 最小镜像距离，修正后位移的欧氏范数
    pub fn distance(&self, from: &[f64; 3], to: &[f64; 3]) -> f64 {
        let d = self.displacement(from, to);
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }
}

/// 每个原子相对参考帧位置的最小镜像距离序列
///
/// 返回 (n_frames, n_atoms) 距离矩阵。
pub fn distance_from_reference(
    traj: &Trajectory,
    cell: &PbcCell,
    reference_frame: usize,
) -> Result<Vec<Vec<f64>>> {
    if traj.n_frames() == 0 {
        return Err(ThermokError::NoData("trajectory has no frames".to_string()));
    }
    if reference_frame >= traj.n_frames() {
        return Err(ThermokError::InvalidArgument(format!(
            "reference frame {} out of range for {} frames",
            reference_frame,
            traj.n_frames()
        )));
    }

    let reference = &traj.frames[reference_frame].coordinates;
    let mut distances = Vec::with_capacity(traj.n_frames());
    for (frame_idx, frame) in traj.frames.iter().enumerate() {
        if frame.coordinates.len() != reference.len() {
            return Err(ThermokError::DimensionError {
                reason: format!(
                    "frame {} has {} atoms, reference frame has {}",
                    frame_idx,
                    frame.coordinates.len(),
                    reference.len()
                ),
            });
        }
        let row = frame
            .coordinates
            .iter()
            .zip(reference.iter())
            .map(|(atom, ref_atom)| cell.distance(ref_atom, atom))
            .collect();
        distances.push(row);
    }

    Ok(distances)
}
