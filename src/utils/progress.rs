//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式，并把核心算法的
//! `Progress` 事件接到进度条上。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/runner.rs` 使用
//! - 使用 `indicatif` crate
//! - 使用 `sqs/progress.rs`

use crate::sqs::{Progress, ProgressReporter};

use indicatif::{ProgressBar, ProgressStyle};

/// 创建标准进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// 创建 spinner（用于不确定进度的任务）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// 把 `Progress` 事件转发到进度条
///
/// `TaskStart` 设置长度并重置位置，`Message` 更新右侧消息。
pub fn bar_reporter(pb: &ProgressBar) -> ProgressReporter<'static> {
    let pb = pb.clone();
    ProgressReporter::with_callback(Box::new(move |event| match event {
        Progress::TaskStart { total_steps } => {
            pb.set_length(total_steps);
            pb.set_position(0);
        }
        Progress::TaskIncrement => pb.inc(1),
        Progress::TaskFinish => pb.finish_and_clear(),
        Progress::Message(msg) => pb.set_message(msg),
    }))
}
