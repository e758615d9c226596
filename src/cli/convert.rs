//! # convert 子命令 CLI 定义
//!
//! 批量把 ATAT lat.in / bestsqs.out 转换为抽象 SQS 的 JSON 记录，
//! 记录中附带端元空间群，输出目录可直接作为数据库使用。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use super::SymmetryArgs;

use clap::Args;
use std::path::PathBuf;

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input lattice file or directory containing lattice files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the JSON records
    #[arg(short, long)]
    pub output: PathBuf,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Glob pattern(s) for input files, comma separated
    #[arg(short, long, default_value = "bestsqs*.out,lat*.in")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    #[command(flatten)]
    pub symmetry: SymmetryArgs,
}
