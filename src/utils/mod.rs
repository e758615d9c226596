//! # 工具函数模块
//!
//! 提供美化输出、进度条、亚晶格模型的命令行语法等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`、`cli/` 和 `batch/` 使用
//! - 子模块: model, output, progress

pub mod model;
pub mod output;
pub mod progress;
