//! # symmetry 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/symmetry.rs`

use super::SymmetryArgs;

use clap::Args;
use std::path::PathBuf;

/// symmetry 子命令参数
#[derive(Args, Debug)]
pub struct SymmetryCmdArgs {
    /// Abstract SQS: a JSON record or an ATAT lattice file
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub symmetry: SymmetryArgs,
}
