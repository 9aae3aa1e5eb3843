//! # 批量执行器
//!
//! 并行处理相互独立的工作单元（run 目录）。
//! 各单元间无共享可变状态，失败逐项收集，不中断其余单元。
//!
//! ## 依赖关系
//! - 被 `batch/reader.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::Result;
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，0 表示按 CPU 核数
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理路径列表，按输入顺序返回各项结果
    pub fn run<T, F>(&self, items: &[PathBuf], message: &str, worker: F) -> Vec<(PathBuf, Result<T>)>
    where
        T: Send,
        F: Fn(&Path) -> Result<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, message);

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .unwrap();

        let results: Vec<(PathBuf, Result<T>)> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = worker(item.as_path());
                    pb.inc(1);
                    (item.clone(), result)
                })
                .collect()
        });

        pb.finish_and_clear();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThermokError;

    #[test]
    fn test_run_collects_failures_without_aborting() {
        let runner = BatchRunner::new(2);
        let items = vec![
            PathBuf::from("ok-1"),
            PathBuf::from("bad"),
            PathBuf::from("ok-2"),
        ];

        let results = runner.run(&items, "Testing", |path| {
            if path.to_string_lossy().starts_with("ok") {
                Ok(path.display().to_string())
            } else {
                Err(ThermokError::Other("boom".to_string()))
            }
        });

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert!(results[2].1.is_ok());
        // 输入顺序保持不变
        assert_eq!(results[2].0, PathBuf::from("ok-2"));
    }
}
