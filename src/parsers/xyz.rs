//! # xyz 轨迹解析器
//!
//! 解析、重写 Lammps 的多帧 xyz 轨迹文件。
//!
//! ## xyz 格式说明
//! ```text
//! 3584                     # 原子数
//! Atoms. Timestep: 0       # 注释/时间步行
//! C 0.0 0.0 0.0            # label x y z，共原子数行
//! ...                      # 下一帧重复以上结构
//! ```
//! 每帧自带原子数行，与首帧不一致时视为帧尺寸错误，
//! 不再沿用首帧原子数静默推算。
//!
//! ## 依赖关系
//! - 被 `commands/analyze/distance.rs` 使用
//! - 使用 `models/trajectory.rs`

use crate::error::{Result, ThermokError};
use crate::models::{Trajectory, TrajectoryFrame};
use regex::Regex;
use std::fs;
use std::path::Path;

/// 读取 xyz 轨迹文件
pub fn read_trajectory(path: &Path) -> Result<Trajectory> {
    let content = fs::read_to_string(path).map_err(|e| ThermokError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_xyz_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 xyz 轨迹
pub fn parse_xyz_content(content: &str, name: &str) -> Result<Trajectory> {
    // 保留行尾符切分，帧原始文本可逐字节复原
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    if lines.is_empty() {
        return Err(ThermokError::ParseError {
            format: "xyz".to_string(),
            path: name.to_string(),
            reason: "empty file".to_string(),
        });
    }

    let n_atoms: usize = lines[0].trim().parse().map_err(|_| ThermokError::ParseError {
        format: "xyz".to_string(),
        path: name.to_string(),
        reason: format!("invalid atom count line: '{}'", lines[0].trim()),
    })?;
    if n_atoms == 0 {
        return Err(ThermokError::ParseError {
            format: "xyz".to_string(),
            path: name.to_string(),
            reason: "atom count is zero".to_string(),
        });
    }

    let frame_size = n_atoms + 2;
    if lines.len() % frame_size != 0 {
        return Err(ThermokError::ParseError {
            format: "xyz".to_string(),
            path: name.to_string(),
            reason: format!(
                "file has {} lines, not a multiple of frame size {}",
                lines.len(),
                frame_size
            ),
        });
    }
    let n_frames = lines.len() / frame_size;

    // 注释行末尾的整数作为时间步编号
    let timestep_re = Regex::new(r"(\d+)\s*$").map_err(|e| ThermokError::Other(e.to_string()))?;

    let mut frames = Vec::with_capacity(n_frames);
    for frame in 0..n_frames {
        let start = frame * frame_size;
        let end = start + frame_size;

        let count: usize = lines[start]
            .trim()
            .parse()
            .map_err(|_| ThermokError::ParseError {
                format: "xyz".to_string(),
                path: name.to_string(),
                reason: format!(
                    "line {}: invalid atom count line: '{}'",
                    start + 1,
                    lines[start].trim()
                ),
            })?;
        if count != n_atoms {
            return Err(ThermokError::FrameSizeMismatch {
                path: name.to_string(),
                frame,
                expected: n_atoms,
                found: count,
            });
        }

        let timestep = timestep_re
            .captures(lines[start + 1].trim_end())
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(frame as u64);

        let mut atoms = Vec::with_capacity(n_atoms);
        let mut coordinates = Vec::with_capacity(n_atoms);
        for (offset, line) in lines[start + 2..end].iter().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(ThermokError::ParseError {
                    format: "xyz".to_string(),
                    path: name.to_string(),
                    reason: format!(
                        "line {}: expected 'label x y z', found '{}'",
                        start + 3 + offset,
                        line.trim_end()
                    ),
                });
            }
            let mut coor = [0.0f64; 3];
            for (i, field) in fields[1..4].iter().enumerate() {
                coor[i] = field.parse().map_err(|_| ThermokError::ParseError {
                    format: "xyz".to_string(),
                    path: name.to_string(),
                    reason: format!(
                        "line {}: invalid coordinate '{}'",
                        start + 3 + offset,
                        field
                    ),
                })?;
            }
            atoms.push(fields[0].to_string());
            coordinates.push(coor);
        }

        frames.push(TrajectoryFrame {
            timestep,
            atoms,
            coordinates,
            xyz: lines[start..end].concat(),
        });
    }

    Ok(Trajectory { frames })
}

/// 将轨迹（或其帧子集）写回 xyz 文件
pub fn write_trajectory(traj: &Trajectory, path: &Path, frames: Option<&[usize]>) -> Result<()> {
    let content = traj.to_xyz_string(frames)?;
    fs::write(path, content).map_err(|e| ThermokError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trajectory::generate_xyz;

    const SAMPLE: &str = "2\n\
                          Atoms. Timestep: 0\n\
                          C 0.0 0.0 0.0\n\
                          O 1.0  2.0   3.0\n\
                          2\n\
                          Atoms. Timestep: 100\n\
                          C 0.1 0.0 0.0\n\
                          O 9.5 2.0 3.0\n";

    #[test]
    fn test_parse_xyz_basic() {
        let traj = parse_xyz_content(SAMPLE, "traj.xyz").unwrap();
        assert_eq!(traj.n_frames(), 2);
        assert_eq!(traj.n_atoms(), 2);
        assert_eq!(traj.frames[0].timestep, 0);
        assert_eq!(traj.frames[1].timestep, 100);
        assert_eq!(traj.frames[0].atoms[1], "O");
        assert!((traj.frames[1].coordinates[1][0] - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_byte_identity() {
        let traj = parse_xyz_content(SAMPLE, "traj.xyz").unwrap();
        let written = traj.to_xyz_string(None).unwrap();
        assert_eq!(written, SAMPLE);
    }

    #[test]
    fn test_roundtrip_frame_subset() {
        let traj = parse_xyz_content(SAMPLE, "traj.xyz").unwrap();
        let written = traj.to_xyz_string(Some(&[1])).unwrap();
        assert!(written.starts_with("2\nAtoms. Timestep: 100\n"));
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn test_parse_synthetic_shapes() {
        for &(n_frames, n_atoms) in &[(1usize, 1usize), (2, 3), (4, 2)] {
            let coords: Vec<Vec<[f64; 3]>> = (0..n_frames)
                .map(|f| (0..n_atoms).map(|a| [f as f64, a as f64, 0.5]).collect())
                .collect();
            let atoms: Vec<Vec<String>> = (0..n_frames)
                .map(|_| (0..n_atoms).map(|_| "C".to_string()).collect())
                .collect();
            let content = generate_xyz(&coords, &atoms, "thermok").unwrap().concat();

            let traj = parse_xyz_content(&content, "synthetic").unwrap();
            assert_eq!(traj.n_frames(), n_frames);
            assert_eq!(traj.n_atoms(), n_atoms);
            for frame in &traj.frames {
                assert_eq!(frame.atoms.len(), n_atoms);
                assert_eq!(frame.coordinates.len(), n_atoms);
            }
        }
    }

    #[test]
    fn test_frame_size_mismatch() {
        let content = "2\n\
                       Atoms. Timestep: 0\n\
                       C 0.0 0.0 0.0\n\
                       O 1.0 2.0 3.0\n\
                       3\n\
                       Atoms. Timestep: 100\n\
                       C 0.1 0.0 0.0\n\
                       O 9.5 2.0 3.0\n";
        let err = parse_xyz_content(content, "traj.xyz").unwrap_err();
        match err {
            ThermokError::FrameSizeMismatch {
                frame,
                expected,
                found,
                ..
            } => {
                assert_eq!(frame, 1);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_truncated_file() {
        let truncated = &SAMPLE[..SAMPLE.len() - 14];
        assert!(parse_xyz_content(truncated, "traj.xyz").is_err());
    }

    #[test]
    fn test_bad_coordinate_line() {
        let content = "1\nAtoms. Timestep: 0\nC 0.0 0.0\n";
        assert!(parse_xyz_content(content, "traj.xyz").is_err());
    }
}
