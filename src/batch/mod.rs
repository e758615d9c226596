//! # 批量处理模块
//!
//! 收集格点文件并行转换，供 `convert` 命令和数据库加载使用。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 按逗号分隔的 glob 模式收集文件
//! - 并行处理，进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 和 `database/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
