//! # sqsutil - SQS 亚晶格代入与枚举工具
//!
//! 把 ATAT 生成的特殊准随机结构 (SQS) 转换为带亚晶格信息的抽象结构，
//! 再代入真实元素得到可用于第一性原理计算的具体结构。
//!
//! ## 子命令
//! - `convert`   - ATAT lat.in / bestsqs.out 批量转换为 JSON 记录
//! - `concrete`  - 代入元素，输出 JSON 或 POSCAR
//! - `enumerate` - 枚举溶液模型的所有具体 SQS
//! - `query`     - 在记录目录中查找相容的 SQS
//! - `symmetry`  - 端元空间群
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── sqs/       (代入、枚举、端元)
//!   │     ├── database/  (记录目录与查询)
//!   │     ├── parsers/   (lat.in 读取, POSCAR 写出)
//!   │     ├── symmetry/  (空间群分析)
//!   │     └── models/    (数据模型)
//!   ├── batch/      (批量并行处理)
//!   ├── utils/      (工具函数)
//!   ├── logging.rs  (tracing 初始化)
//!   ├── elements.rs (元素数据)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod database;
mod elements;
mod error;
mod logging;
mod models;
mod parsers;
mod sqs;
mod symmetry;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
