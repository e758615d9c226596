//! # convert 命令实现
//!
//! 批量把 ATAT 格点文件转换为抽象 SQS 的 JSON 记录。
//!
//! ## 功能
//! - 单文件或目录输入（可递归），按 glob 模式筛选
//! - 记录中附带端元空间群
//! - 并行处理，已存在的输出默认跳过
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/` 收集和并行处理文件
//! - 使用 `sqs/builder.rs`, `symmetry/`

use super::{ensure_dir, write_json};
use crate::batch::{BatchRunner, FileCollector};
use crate::cli::convert::ConvertArgs;
use crate::error::Result;
use crate::sqs;
use crate::symmetry::{SymmetryAnalyzer, SymmetryTolerances};
use crate::utils::output;

use std::path::{Path, PathBuf};
use tracing::debug;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header("Converting ATAT lattices to abstract SQS records");

    let collector = FileCollector::new(&args.input)
        .with_pattern(&args.pattern)?
        .recursive(args.recursive);
    let files = collector.collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    ensure_dir(&args.output)?;
    output::print_info(&format!("Found {} lattice file(s)", files.len()));

    // 单文件输入时以其所在目录为根
    let root: PathBuf = if collector.is_single_file() {
        args.input.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        args.input.clone()
    };

    let analyzer = args.symmetry.analyzer();
    let tolerances = args.symmetry.tolerances();

    let result = BatchRunner::new(args.jobs).run(files, |path| {
        convert_file(path, &root, &args.output, args.overwrite, &analyzer, tolerances)
    })?;

    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path.display(), err));
    }

    output::print_done(&format!(
        "Converted {} of {} file(s) into '{}' ({} skipped, {} failed)",
        result.written,
        result.total(),
        args.output.display(),
        result.skipped,
        result.failed()
    ));

    Ok(())
}

/// 转换单个文件，返回 false 表示输出已存在而跳过
fn convert_file(
    path: &Path,
    root: &Path,
    output_dir: &Path,
    overwrite: bool,
    analyzer: &dyn SymmetryAnalyzer,
    tolerances: SymmetryTolerances,
) -> Result<bool> {
    let output_path = output_dir.join(record_file_name(path, root));
    if output_path.exists() && !overwrite {
        debug!(path = %output_path.display(), "Output exists, skipping");
        return Ok(false);
    }

    let record = sqs::lat_in_file_to_sqs(path)?.to_record(analyzer, tolerances)?;
    write_json(&record, &output_path)?;
    debug!(
        input = %path.display(),
        output = %output_path.display(),
        symmetry = %record.symmetry,
        "Wrote record"
    );
    Ok(true)
}

/// 输出文件名：相对路径各段用 `_` 连接，例如 `fcc/L12/bestsqs.out` -> `fcc_L12_bestsqs.out.json`
fn record_file_name(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let stem = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .filter(|c| c != "/" && c != ".")
        .collect::<Vec<_>>()
        .join("_");
    format!("{}.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbstractSqs, AbstractSqsRecord};
    use crate::sqs::fixtures::{self, FCC_L12};
    use crate::symmetry::testing::FixedAnalyzer;
    use std::fs;

    #[test]
    fn test_record_file_name() {
        assert_eq!(
            record_file_name(Path::new("db/fcc/L12/bestsqs.out"), Path::new("db")),
            "fcc_L12_bestsqs.out.json"
        );
        assert_eq!(
            record_file_name(Path::new("lat.in"), Path::new("")),
            "lat.in.json"
        );
    }

    #[test]
    fn test_convert_file_writes_record_and_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("atat").join("L12");
        let output_dir = dir.path().join("records");
        fs::create_dir_all(&input_dir).unwrap();
        fs::create_dir_all(&output_dir).unwrap();
        let input = input_dir.join("bestsqs.out");
        fs::write(&input, FCC_L12).unwrap();

        let analyzer = FixedAnalyzer::new("Pm-3m", 221);
        let root = dir.path().join("atat");
        let tol = SymmetryTolerances::default();

        assert!(convert_file(&input, &root, &output_dir, false, &analyzer, tol).unwrap());
        let written = output_dir.join("L12_bestsqs.out.json");
        let record: AbstractSqsRecord =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(record.symmetry.number, 221);
        assert_eq!(record.sublattice_site_ratios, vec![vec![1, 1], vec![6]]);
        assert_eq!(
            AbstractSqs::from_record(record).unwrap(),
            fixtures::abstract_sqs(FCC_L12)
        );

        assert!(!convert_file(&input, &root, &output_dir, false, &analyzer, tol).unwrap());
        assert_eq!(analyzer.calls(), 1);
        assert!(convert_file(&input, &root, &output_dir, true, &analyzer, tol).unwrap());
        assert_eq!(analyzer.calls(), 2);
    }

    #[test]
    fn test_convert_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lat.in");
        fs::write(&input, "1 0 0\n0 1 0\n").unwrap();
        let analyzer = FixedAnalyzer::new("P1", 1);

        let result = convert_file(
            &input,
            dir.path(),
            dir.path(),
            false,
            &analyzer,
            SymmetryTolerances::default(),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("lat.in.json").exists());
    }
}
