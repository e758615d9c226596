//! # 统一错误处理模块
//!
//! 定义 sqsutil 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// sqsutil 统一错误类型
#[derive(Error, Debug)]
pub enum SqsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} input: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid structure format: {0}")]
    InvalidFormat(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("JSON Error in {path}: {source}")]
    JsonRecord {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 亚晶格模型错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Concrete sublattice model {concrete:?} does not match size of abstract sublattice model {abstract_model:?}"
    )]
    SublatticeMismatch {
        concrete: Vec<Vec<String>>,
        abstract_model: Vec<Vec<String>>,
    },

    #[error(
        "The passed sublattice model ({solution:?}) is of lower order than the passed structure supports ({abstract_model:?})"
    )]
    LowerOrderModel {
        solution: Vec<Vec<String>>,
        abstract_model: Vec<Vec<String>>,
    },

    #[error(
        "Passed re-indexing indices ({given:?}) do not match the sublattice model indices ({expected:?})"
    )]
    InvalidReindex {
        given: Vec<usize>,
        expected: Vec<usize>,
    },

    // ─────────────────────────────────────────────────────────────
    // 元素数据错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Element {element} has no '{property}' data")]
    MissingProperty {
        element: String,
        property: &'static str,
    },

    // ─────────────────────────────────────────────────────────────
    // 对称性 / 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("Space group analysis failed: {0}")]
    Symmetry(String),

    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SqsError>;
