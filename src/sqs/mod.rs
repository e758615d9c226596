//! # SQS 核心算法
//!
//! ## 子模块
//! - `builder`: lat.in -> 抽象 SQS
//! - `substitution`: 抽象 SQS + 具体亚晶格模型 -> 具体 SQS
//! - `endmember`: 端元结构及其空间群
//! - `enumeration`: 枚举溶液模型的所有代入
//! - `progress`: 注入式进度报告
//!
//! ## 数据流
//! ```text
//! lat.in 文本 -> ParsedLattice -> AbstractSqs -> ConcreteSqs / Vec<ConcreteSqs> -> JSON
//! ```
//!
//! ## 依赖关系
//! - 使用 `models/`、`parsers/`、`symmetry/`、`elements.rs`
//! - 被 `commands/`、`database/` 使用

pub mod builder;
pub mod endmember;
pub mod enumeration;
pub mod progress;
pub mod substitution;

#[cfg(test)]
pub mod fixtures;

pub use builder::{build_abstract_sqs, lat_in_file_to_sqs, lat_in_to_sqs};
pub use endmember::{get_endmember_space_group_info, get_endmember_sqs};
pub use enumeration::{enumerate_sqs, EnumerationOptions};
pub use progress::{Progress, ProgressReporter};
pub use substitution::get_concrete_sqs;
