//! # 数据模型模块
//!
//! 定义晶体结构和 SQS 数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`sqs/`、`database/` 和 `commands/` 使用
//! - 子模块: structure, sqs

pub mod sqs;
pub mod structure;

pub use sqs::{
    reindex_sublattice, AbstractSqs, AbstractSqsRecord, ConcreteSqs, EspeiSublattice,
};
pub use structure::{CrystalStructure, Lattice, Site, Species};
