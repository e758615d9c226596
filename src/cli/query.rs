//! # query 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/query.rs`

use super::SublatticeModelArg;

use clap::Args;
use std::path::PathBuf;

/// query 子命令参数
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Directory of abstract SQS JSON records (searched recursively)
    #[arg(long)]
    pub db: PathBuf,

    /// Target sublattice model, e.g. "Al,Ni;Al"
    #[arg(short, long)]
    pub model: SublatticeModelArg,

    /// Target site ratios, one per sublattice, e.g. "3,1"
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub ratios: Vec<f64>,

    /// Only return records whose endmember space group has this symbol
    #[arg(short, long)]
    pub symmetry: Option<String>,
}
