//! # 时间平均位移统计
//!
//! 单个原子坐标随时间的逐轴平均位移与平均平方位移，
//! 可选以参考帧位置归一化。
//!
//! ## 依赖关系
//! - 被 `commands/analyze/distance.rs` 调用
//! - 无外部模块依赖（除 `error`）

use crate::error::{Result, ThermokError};

/// 校验坐标序列与参考帧索引
fn check_reference(coordinates: &[[f64; 3]], reference_frame: usize) -> Result<()> {
    if coordinates.is_empty() {
        return Err(ThermokError::NoData(
            "coordinate series is empty".to_string(),
        ));
    }
    if reference_frame >= coordinates.len() {
        return Err(ThermokError::InvalidArgument(format!(
            "reference frame {} out of range for {} frames",
            reference_frame,
            coordinates.len()
        )));
    }
    Ok(())
}

/// 单个原子的逐轴时间平均位移
///
/// `normalize` 为真时先减去参考帧位置。
pub fn time_avg_displacement(
    coordinates: &[[f64; 3]],
    normalize: bool,
    reference_frame: usize,
) -> Result<[f64; 3]> {
    check_reference(coordinates, reference_frame)?;
    let reference = coordinates[reference_frame];
    let n = coordinates.len() as f64;

    let mut avg = [0.0; 3];
    for coor in coordinates {
        for i in 0..3 {
            let value = if normalize {
                coor[i] - reference[i]
            } else {
                coor[i]
            };
            avg[i] += value;
        }
    }
    for value in avg.iter_mut() {
        *value /= n;
    }
    Ok(avg)
}

/// 单个原子的逐轴时间平均平方位移
pub fn time_avg_squared_displacement(
    coordinates: &[[f64; 3]],
    normalize: bool,
    reference_frame: usize,
) -> Result<[f64; 3]> {
    check_reference(coordinates, reference_frame)?;
    let reference = coordinates[reference_frame];
    let n = coordinates.len() as f64;

    let mut avg = [0.0; 3];
    for coor in coordinates {
        for i in 0..3 {
            let value = if normalize {
                coor[i] - reference[i]
            } else {
                coor[i]
            };
            avg[i] += value * value;
        }
    }
    for value in avg.iter_mut() {
        *value /= n;
    }
    Ok(avg)
}
