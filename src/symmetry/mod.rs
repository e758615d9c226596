//! # 对称性分析模块
//!
//! 空间群判定由外部几何库完成，这里只定义接口和容差参数。
//!
//! ## 子模块
//! - `spglib`: 通过 python + spglib 计算空间群
//!
//! ## 依赖关系
//! - 被 `sqs/endmember.rs`、`models/sqs.rs` 使用
//! - 使用 `models/structure.rs`

pub mod spglib;

pub use spglib::SpglibScript;

use crate::error::Result;
use crate::models::CrystalStructure;

use serde::{Deserialize, Serialize};
use std::fmt;

/// 空间群信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceGroupInfo {
    /// 国际符号，例如 "Pm-3m"
    pub symbol: String,
    /// 国际序号，例如 221
    pub number: u32,
}

impl fmt::Display for SpaceGroupInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.number)
    }
}

/// 对称性判定容差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryTolerances {
    /// 位置容差 (Å)
    pub symprec: f64,
    /// 角度容差 (度)
    pub angle_tolerance: f64,
}

impl Default for SymmetryTolerances {
    fn default() -> Self {
        SymmetryTolerances {
            symprec: 1e-2,
            angle_tolerance: 5.0,
        }
    }
}

/// 外部空间群分析服务
pub trait SymmetryAnalyzer {
    /// 返回结构的空间群
    fn space_group(
        &self,
        structure: &CrystalStructure,
        tolerances: SymmetryTolerances,
    ) -> Result<SpaceGroupInfo>;
}
