//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `convert`: ATAT lat.in -> 抽象 SQS 记录 (JSON)
//! - `concrete`: 抽象 SQS + 亚晶格模型 -> 具体 SQS
//! - `enumerate`: 枚举溶液模型的所有具体 SQS
//! - `query`: 在 SQS 数据库中查找匹配的结构
//! - `symmetry`: 端元空间群
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert, concrete, enumerate, query, symmetry

pub mod concrete;
pub mod convert;
pub mod enumerate;
pub mod query;
pub mod symmetry;

use crate::error::SqsError;
use crate::symmetry::{SpglibScript, SymmetryTolerances};
use crate::utils::model::parse_sublattice_model;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// sqsutil - SQS 亚晶格代入与枚举工具
#[derive(Parser)]
#[command(name = "sqsutil")]
#[command(version)]
#[command(
    about = "Turn ATAT special quasirandom structures into concrete, sublattice-aware crystal structures",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert ATAT lattice files (bestsqs.out, lat.in) into abstract SQS records
    Convert(convert::ConvertArgs),

    /// Substitute real elements into an abstract SQS
    Concrete(concrete::ConcreteArgs),

    /// Enumerate every distinct SQS for a solution sublattice model
    Enumerate(enumerate::EnumerateArgs),

    /// Find database records compatible with a sublattice model
    Query(query::QueryArgs),

    /// Print the endmember space group of an abstract SQS
    Symmetry(symmetry::SymmetryCmdArgs),
}

/// 亚晶格模型参数，写作 `Fe,Ni;Al`
#[derive(Debug, Clone, PartialEq)]
pub struct SublatticeModelArg(pub Vec<Vec<String>>);

impl FromStr for SublatticeModelArg {
    type Err = SqsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sublattice_model(s).map(SublatticeModelArg)
    }
}

/// 结构输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StructureFormat {
    /// JSON record with sublattice metadata
    Json,
    /// VASP POSCAR (geometry only)
    Poscar,
}

impl std::fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureFormat::Json => write!(f, "json"),
            StructureFormat::Poscar => write!(f, "poscar"),
        }
    }
}

/// 对称性分析参数
#[derive(Args, Debug, Clone)]
pub struct SymmetryArgs {
    /// Distance tolerance for symmetry finding (Å)
    #[arg(long, env = "SQSUTIL_SYMPREC", default_value_t = 1e-2)]
    pub symprec: f64,

    /// Angle tolerance for symmetry finding (degrees)
    #[arg(long, env = "SQSUTIL_ANGLE_TOLERANCE", default_value_t = 5.0)]
    pub angle_tolerance: f64,

    /// Python interpreter with spglib installed
    #[arg(long, env = "SQSUTIL_PYTHON", default_value = "python3")]
    pub python: String,
}

impl SymmetryArgs {
    pub fn tolerances(&self) -> SymmetryTolerances {
        SymmetryTolerances {
            symprec: self.symprec,
            angle_tolerance: self.angle_tolerance,
        }
    }

    pub fn analyzer(&self) -> SpglibScript {
        SpglibScript::new(self.python.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_enumerate() {
        let cli = Cli::try_parse_from([
            "sqsutil",
            "-vv",
            "enumerate",
            "-i",
            "L12.json",
            "-m",
            "Al,Ni;Fe,Cr",
            "--endmembers",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Enumerate(args) => {
                assert_eq!(
                    args.model.0,
                    vec![
                        vec!["Al".to_string(), "Ni".to_string()],
                        vec!["Fe".to_string(), "Cr".to_string()]
                    ]
                );
                assert!(args.endmembers);
                assert!(!args.no_scale_volume);
                assert_eq!(args.format, StructureFormat::Json);
            }
            _ => panic!("expected enumerate"),
        }
    }

    #[test]
    fn test_parse_query_ratios() {
        let cli = Cli::try_parse_from([
            "sqsutil", "query", "--db", "db", "-m", "Al,Ni;Al", "-r", "3,1",
        ])
        .unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.ratios, vec![3.0, 1.0]);
                assert!(args.symmetry.is_none());
            }
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        let result = Cli::try_parse_from([
            "sqsutil", "concrete", "-i", "a.json", "-m", "Fe;;Al", "-o", "out.json",
        ]);
        assert!(result.is_err());
    }
}
