//! # enumerate 命令实现
//!
//! 枚举溶液模型下所有不同的具体 SQS，写出结构文件并汇总为表格。
//!
//! ## 功能
//! - 进度条跟踪代入过程
//! - 终端表格摘要
//! - 可选 CSV 汇总
//!
//! ## 依赖关系
//! - 使用 `cli/enumerate.rs` 定义的参数
//! - 使用 `sqs/enumeration.rs`
//! - 使用 `utils/progress.rs`, `utils/model.rs`

use super::{ensure_dir, load_abstract_sqs, write_concrete};
use crate::cli::enumerate::EnumerateArgs;
use crate::cli::StructureFormat;
use crate::error::{Result, SqsError};
use crate::models::ConcreteSqs;
use crate::sqs::{self, EnumerationOptions};
use crate::utils::model::{format_occupancies, format_sublattice_model};
use crate::utils::{output, progress};

use std::path::Path;
use tabled::{Table, Tabled};

/// 表格行
#[derive(Debug, Clone, Tabled)]
struct EnumeratedRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Configuration")]
    configuration: String,
    #[tabled(rename = "Occupancies")]
    occupancies: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Volume (Å³)")]
    volume: String,
    #[tabled(rename = "File")]
    file: String,
}

/// 执行 enumerate 命令
pub fn execute(args: EnumerateArgs) -> Result<()> {
    output::print_header(&format!(
        "Enumerating SQS for {}",
        format_sublattice_model(&args.model.0)
    ));

    let abstract_sqs = load_abstract_sqs(&args.input)?;
    let options = EnumerationOptions {
        endmembers: args.endmembers,
        scale_volume: !args.no_scale_volume,
        skip_on_failure: args.skip_on_failure,
    };

    let pb = progress::create_progress_bar(0, "Substituting");
    let reporter = progress::bar_reporter(&pb);
    let structures = sqs::enumerate_sqs(&abstract_sqs, &args.model.0, &options, &reporter)?;
    pb.finish_and_clear();

    if structures.is_empty() {
        output::print_warning("No structures are compatible with the solution model");
        return Ok(());
    }

    ensure_dir(&args.output)?;
    let mut rows = Vec::with_capacity(structures.len());
    for (i, concrete) in structures.iter().enumerate() {
        let file = structure_file_name(i, args.format);
        write_concrete(concrete, args.format, &args.output.join(&file))?;
        rows.push(summary_row(i, concrete, file));
    }

    println!("{}", Table::new(&rows));

    if let Some(csv_path) = &args.csv {
        save_summary_csv(&rows, csv_path)?;
        output::print_success(&format!("Summary saved to '{}'", csv_path.display()));
    }

    output::print_done(&format!(
        "Wrote {} structure(s) to '{}'",
        structures.len(),
        args.output.display()
    ));
    Ok(())
}

fn structure_file_name(index: usize, format: StructureFormat) -> String {
    match format {
        StructureFormat::Json => format!("sqs_{:03}.json", index),
        StructureFormat::Poscar => format!("POSCAR_{:03}", index),
    }
}

fn summary_row(index: usize, concrete: &ConcreteSqs, file: String) -> EnumeratedRow {
    EnumeratedRow {
        index,
        configuration: format_sublattice_model(&concrete.sublattice_configuration),
        occupancies: format_occupancies(&concrete.sublattice_occupancies),
        formula: concrete.structure.formula(),
        volume: format!("{:.4}", concrete.structure.volume()),
        file,
    }
}

/// 保存汇总 CSV
fn save_summary_csv(rows: &[EnumeratedRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "index",
        "configuration",
        "occupancies",
        "formula",
        "volume_A3",
        "file",
    ])?;

    for row in rows {
        wtr.write_record([
            row.index.to_string(),
            row.configuration.clone(),
            row.occupancies.clone(),
            row.formula.clone(),
            row.volume.clone(),
            row.file.clone(),
        ])?;
    }

    wtr.flush().map_err(|e| SqsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
