//! # 批量执行器
//!
//! 在独立的 rayon 线程池里对每个文件调用处理函数，并汇总结果。
//! 单个文件的失败只记录，不会中断整个批次。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SqsError};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 已写出
    Written(PathBuf),
    /// 输出已存在
    Skipped(PathBuf),
    /// 处理失败，附错误信息
    Failed(PathBuf, String),
}

impl ProcessResult {
    /// 处理函数的返回值：`Ok(true)` 写出，`Ok(false)` 跳过
    fn from_outcome(path: &Path, outcome: Result<bool>) -> Self {
        match outcome {
            Ok(true) => ProcessResult::Written(path.to_path_buf()),
            Ok(false) => ProcessResult::Skipped(path.to_path_buf()),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Processing failed");
                ProcessResult::Failed(path.to_path_buf(), e.to_string())
            }
        }
    }
}

/// 批量处理统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub written: usize,
    pub skipped: usize,
    /// 按输入顺序的失败文件及原因
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Written(_) => self.written += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed()
    }
}

/// 批量执行器
pub struct BatchRunner {
    jobs: usize,
    show_progress: bool,
}

impl BatchRunner {
    /// `jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// 并行处理文件列表
    ///
    /// `processor` 返回 `Ok(true)` 表示写出了结果，`Ok(false)` 表示跳过。
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&Path) -> Result<bool> + Sync + Send,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SqsError::InvalidArgument(format!("Cannot build thread pool: {}", e)))?;

        debug!(files = files.len(), jobs = self.jobs, "Starting batch");
        let pb = self
            .show_progress
            .then(|| progress::create_progress_bar(files.len() as u64, "Converting"));

        // collect 保持输入顺序
        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = ProcessResult::from_outcome(file, processor(file));
                    if let Some(pb) = &pb {
                        pb.inc(1);
                    }
                    result
                })
                .collect()
        });

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }
        Ok(batch_result)
    }
}
