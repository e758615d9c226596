//! # enumerate 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/enumerate.rs`

use super::{StructureFormat, SublatticeModelArg};

use clap::Args;
use std::path::PathBuf;

/// enumerate 子命令参数
#[derive(Args, Debug)]
pub struct EnumerateArgs {
    /// Abstract SQS: a JSON record or an ATAT lattice file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Solution sublattice model, e.g. "Al,Ni;Fe,Cr"
    #[arg(short, long)]
    pub model: SublatticeModelArg,

    /// Also generate endmember (single species per sublattice) substitutions
    #[arg(long, default_value_t = false)]
    pub endmembers: bool,

    /// Keep the SQS cell volume instead of scaling to elemental densities
    #[arg(long, default_value_t = false)]
    pub no_scale_volume: bool,

    /// Return nothing instead of failing when the model is of lower order than the SQS
    #[arg(long, default_value_t = false)]
    pub skip_on_failure: bool,

    /// Output directory for the structures
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = StructureFormat::Json)]
    pub format: StructureFormat,

    /// Write a CSV summary of the enumerated structures
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
