//! # SQS 数据库
//!
//! 把一个目录下（递归）的所有 `*.json` 抽象 SQS 记录读入内存，
//! 并按亚晶格模型和位点比查询。
//!
//! ## 子模块
//! - `query`: 亚晶格模型匹配
//!
//! ## 依赖关系
//! - 使用 `batch/collector.rs` 收集文件
//! - 使用 `models/sqs.rs` 的 `AbstractSqsRecord`
//! - 被 `commands/query.rs` 使用

pub mod query;

pub use query::{structures_from_database, DatabaseMatch};

use crate::batch::FileCollector;
use crate::error::{Result, SqsError};
use crate::models::AbstractSqsRecord;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 数据库中的一条记录
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseEntry {
    /// 来源文件，内存中插入的记录为 None
    pub source: Option<PathBuf>,
    pub record: AbstractSqsRecord,
}

/// 内存中的抽象 SQS 数据库
#[derive(Debug, Clone, Default)]
pub struct SqsDatabase {
    entries: Vec<DatabaseEntry>,
}

impl SqsDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 递归读取目录下的所有 JSON 记录，任何一个文件损坏都会中止加载
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SqsError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let files = FileCollector::new(dir)
            .with_pattern("*.json")?
            .recursive(true)
            .collect()?;

        let mut db = SqsDatabase::new();
        for path in files {
            let content = fs::read_to_string(&path).map_err(|e| SqsError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;
            let record: AbstractSqsRecord =
                serde_json::from_str(&content).map_err(|e| SqsError::JsonRecord {
                    path: path.display().to_string(),
                    source: e,
                })?;
            debug!(path = %path.display(), symmetry = %record.symmetry, "Loaded record");
            db.entries.push(DatabaseEntry {
                source: Some(path),
                record,
            });
        }

        info!(records = db.len(), dir = %dir.display(), "Loaded SQS database");
        Ok(db)
    }

    pub fn insert(&mut self, record: AbstractSqsRecord) {
        self.entries.push(DatabaseEntry {
            source: None,
            record,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DatabaseEntry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &AbstractSqsRecord> {
        self.entries.iter().map(|e| &e.record)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sqs::fixtures::{self, FCC_L12, ROCKSALT_B1};
    use crate::symmetry::testing::FixedAnalyzer;
    use crate::symmetry::SymmetryTolerances;

    pub(crate) fn l12_record() -> AbstractSqsRecord {
        fixtures::abstract_sqs(FCC_L12)
            .to_record(&FixedAnalyzer::new("Pm-3m", 221), SymmetryTolerances::default())
            .unwrap()
    }

    pub(crate) fn b1_record() -> AbstractSqsRecord {
        fixtures::abstract_sqs(ROCKSALT_B1)
            .to_record(&FixedAnalyzer::new("Fm-3m", 225), SymmetryTolerances::default())
            .unwrap()
    }

    #[test]
    fn test_load_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("fcc")).unwrap();
        fs::write(
            dir.path().join("b1.json"),
            serde_json::to_string(&b1_record()).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("fcc").join("l12.json"),
            serde_json::to_string_pretty(&l12_record()).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("README.txt"), "not a record").unwrap();

        let db = SqsDatabase::load(dir.path()).unwrap();
        assert_eq!(db.len(), 2);
        assert!(!db.is_empty());

        let symbols: Vec<_> = db.records().map(|r| r.symmetry.symbol.clone()).collect();
        assert_eq!(symbols, vec!["Fm-3m", "Pm-3m"]);
        assert_eq!(db.entries()[1].record, l12_record());
        assert!(db.entries()[1].source.as_ref().unwrap().ends_with("fcc/l12.json"));
    }

    #[test]
    fn test_malformed_record_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("good.json"),
            serde_json::to_string(&l12_record()).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{\"lattice\": ").unwrap();

        match SqsDatabase::load(dir.path()) {
            Err(err @ SqsError::JsonRecord { .. }) => {
                assert!(err.to_string().contains("broken.json"));
            }
            other => panic!("expected JsonRecord error, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_missing_directory() {
        assert!(matches!(
            SqsDatabase::load(Path::new("/no/such/sqs/db")),
            Err(SqsError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_insert() {
        let mut db = SqsDatabase::new();
        assert!(db.is_empty());
        db.insert(l12_record());
        assert_eq!(db.len(), 1);
        assert!(db.entries()[0].source.is_none());
    }
}
