//! # concrete 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/concrete.rs`

use super::{StructureFormat, SublatticeModelArg};

use clap::Args;
use std::path::PathBuf;

/// concrete 子命令参数
#[derive(Args, Debug)]
pub struct ConcreteArgs {
    /// Abstract SQS: a JSON record or an ATAT lattice file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Concrete sublattice model, e.g. "Fe,Ni;Al" (one element per abstract species)
    #[arg(short, long)]
    pub model: SublatticeModelArg,

    /// Keep the SQS cell volume instead of scaling to elemental densities
    #[arg(long, default_value_t = false)]
    pub no_scale_volume: bool,

    /// Reorder the sublattices of the result, e.g. "1,0"
    #[arg(long, value_delimiter = ',')]
    pub reindex: Option<Vec<usize>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = StructureFormat::Json)]
    pub format: StructureFormat,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}
