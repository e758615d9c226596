//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及子命令共用的读写工具。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `sqs/`, `database/`, `parsers/`, `utils/`
//! - 子模块: convert, concrete, enumerate, query, symmetry

pub mod concrete;
pub mod convert;
pub mod enumerate;
pub mod query;
pub mod symmetry;

use crate::cli::{Commands, StructureFormat};
use crate::error::{Result, SqsError};
use crate::models::{AbstractSqs, AbstractSqsRecord, ConcreteSqs};
use crate::parsers::poscar;
use crate::sqs;

use serde::Serialize;
use std::fs;
use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Convert(args) => convert::execute(args),
        Commands::Concrete(args) => concrete::execute(args),
        Commands::Enumerate(args) => enumerate::execute(args),
        Commands::Query(args) => query::execute(args),
        Commands::Symmetry(args) => symmetry::execute(args),
    }
}

/// 读取抽象 SQS：`.json` 视为序列化记录，其他文件按 ATAT 格式解析
pub fn load_abstract_sqs(path: &Path) -> Result<AbstractSqs> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if !is_json {
        return sqs::lat_in_file_to_sqs(path);
    }

    let content = fs::read_to_string(path).map_err(|e| SqsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let record: AbstractSqsRecord =
        serde_json::from_str(&content).map_err(|e| SqsError::JsonRecord {
            path: path.display().to_string(),
            source: e,
        })?;
    AbstractSqs::from_record(record)
}

/// 以缩进格式写出 JSON
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| SqsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 按格式写出具体 SQS
pub fn write_concrete(concrete: &ConcreteSqs, format: StructureFormat, path: &Path) -> Result<()> {
    match format {
        StructureFormat::Json => write_json(concrete, path),
        StructureFormat::Poscar => {
            poscar::write_poscar_file(&concrete.structure, &concrete.structure.formula(), path)
        }
    }
}

/// 创建输出目录
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| SqsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqs::fixtures::{self, GA3PT5};
    use crate::symmetry::testing::FixedAnalyzer;
    use crate::symmetry::SymmetryTolerances;

    #[test]
    fn test_load_abstract_sqs_from_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let expected = fixtures::abstract_sqs(GA3PT5);

        let lat_path = dir.path().join("bestsqs.out");
        fs::write(&lat_path, GA3PT5).unwrap();
        assert_eq!(load_abstract_sqs(&lat_path).unwrap(), expected);

        let json_path = dir.path().join("Ga3Pt5.json");
        let record = expected
            .to_record(&FixedAnalyzer::new("P4/mmm", 123), SymmetryTolerances::default())
            .unwrap();
        write_json(&record, &json_path).unwrap();
        assert_eq!(load_abstract_sqs(&json_path).unwrap(), expected);

        let broken = dir.path().join("broken.JSON");
        fs::write(&broken, "[]").unwrap();
        assert!(matches!(
            load_abstract_sqs(&broken),
            Err(SqsError::JsonRecord { .. })
        ));
    }
}
