//! # 轨迹数据模型
//!
//! 多帧原子坐标轨迹的内存表示与子集划分操作。
//! 轨迹由解析创建后只读，划分操作产生独立的新数组。
//!
//! ## 依赖关系
//! - 被 `parsers/xyz.rs`, `trajectory/`, `commands/` 使用
//! - 无外部模块依赖（除 `error`）

use crate::error::{Result, ThermokError};

/// 单个时间步的轨迹快照
#[derive(Debug, Clone)]
pub struct TrajectoryFrame {
    /// 注释行中的时间步编号
    pub timestep: u64,

    /// 原子类型标签，长度等于原子数
    pub atoms: Vec<String>,

    /// 原子坐标，与 atoms 平行
    pub coordinates: Vec<[f64; 3]>,

    /// 本帧原始文本块，用于逐字节重写
    pub xyz: String,
}

/// 多帧原子坐标轨迹
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub frames: Vec<TrajectoryFrame>,
}

impl Trajectory {
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// 每帧原子数，解析时已校验全轨迹一致
    pub fn n_atoms(&self) -> usize {
        self.frames.first().map(|f| f.atoms.len()).unwrap_or(0)
    }

    /// 按帧/原子/坐标轴子集划分坐标，产生独立的新数组
    ///
    /// `None` 表示取全集。越界索引报 DimensionError。
    pub fn subdivide_coordinates(
        &self,
        frames: Option<&[usize]>,
        atoms: Option<&[usize]>,
        dims: Option<&[usize]>,
    ) -> Result<Vec<Vec<Vec<f64>>>> {
        let frame_idx = resolve_indices(frames, self.n_frames(), "frame")?;
        let atom_idx = resolve_indices(atoms, self.n_atoms(), "atom")?;
        let dim_idx = resolve_indices(dims, 3, "dimension")?;

        let mut result = Vec::with_capacity(frame_idx.len());
        for &f in &frame_idx {
            let frame = &self.frames[f];
            let mut frame_coords = Vec::with_capacity(atom_idx.len());
            for &a in &atom_idx {
                let mut atom_coords = Vec::with_capacity(dim_idx.len());
                for &d in &dim_idx {
                    atom_coords.push(frame.coordinates[a][d]);
                }
                frame_coords.push(atom_coords);
            }
            result.push(frame_coords);
        }
        Ok(result)
    }

    /// 按帧/原子子集划分原子标签
    pub fn subdivide_atoms(
        &self,
        frames: Option<&[usize]>,
        atoms: Option<&[usize]>,
    ) -> Result<Vec<Vec<String>>> {
        let frame_idx = resolve_indices(frames, self.n_frames(), "frame")?;
        let atom_idx = resolve_indices(atoms, self.n_atoms(), "atom")?;

        let mut result = Vec::with_capacity(frame_idx.len());
        for &f in &frame_idx {
            let frame = &self.frames[f];
            result.push(atom_idx.iter().map(|&a| frame.atoms[a].clone()).collect());
        }
        Ok(result)
    }

    /// 序列化选定帧（默认全部，保持原顺序）为 xyz 文本
    ///
    /// 未修改的帧逐字节复现原始文件内容。
    pub fn to_xyz_string(&self, frames: Option<&[usize]>) -> Result<String> {
        let frame_idx = resolve_indices(frames, self.n_frames(), "frame")?;
        let mut out = String::new();
        for &f in &frame_idx {
            out.push_str(&self.frames[f].xyz);
        }
        Ok(out)
    }
}

/// 解析子集索引，`None` 展开为全集，越界报 DimensionError
fn resolve_indices(subset: Option<&[usize]>, len: usize, what: &str) -> Result<Vec<usize>> {
    match subset {
        None => Ok((0..len).collect()),
        Some(indices) => {
            for &i in indices {
                if i >= len {
                    return Err(ThermokError::DimensionError {
                        reason: format!("{} index {} out of range for {} {}s", what, i, len, what),
                    });
                }
            }
            Ok(indices.to_vec())
        }
    }
}

/// 由坐标与原子标签生成 xyz 文本帧
///
/// 坐标与标签的帧数不一致时报错。
pub fn generate_xyz(
    coordinates: &[Vec<[f64; 3]>],
    atoms: &[Vec<String>],
    header: &str,
) -> Result<Vec<String>> {
    if coordinates.len() != atoms.len() {
        return Err(ThermokError::InvalidArgument(format!(
            "number of frames do not match for coordinates ({}) and atoms ({})",
            coordinates.len(),
            atoms.len()
        )));
    }
    let mut frames = Vec::with_capacity(coordinates.len());
    for (frame, (coords, labels)) in coordinates.iter().zip(atoms.iter()).enumerate() {
        if coords.len() != labels.len() {
            return Err(ThermokError::FrameSizeMismatch {
                path: header.to_string(),
                frame,
                expected: labels.len(),
                found: coords.len(),
            });
        }
        let mut text = format!("{}\n{} - {}\n", labels.len(), header, frame);
        for (label, coor) in labels.iter().zip(coords.iter()) {
            text.push_str(&format!(
                "{:<2} {:<8.4} {:<8.4} {:<8.4}\n",
                label, coor[0], coor[1], coor[2]
            ));
        }
        frames.push(text);
    }
    Ok(frames)
}
