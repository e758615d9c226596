//! # 解析器模块
//!
//! 提供 ATAT lat.in 解析和 POSCAR 输出。
//!
//! ## 依赖关系
//! - 被 `sqs/builder.rs` 和 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: lat_in, poscar

pub mod lat_in;
pub mod poscar;

pub use lat_in::{parse_lat_in, parse_lat_in_file, CoordinateSystem, ParsedAtom, ParsedLattice};
pub use poscar::{to_poscar_string, write_poscar_file};
