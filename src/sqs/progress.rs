//! # 进度报告
//!
//! 核心算法不直接操作终端，而是通过注入的回调报告进度，
//! 由 `commands/` 把事件转换成进度条。

/// 进度事件
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// 开始一个有 `total_steps` 步的任务
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// 进度回调的持有者，无回调时所有事件被丢弃
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
