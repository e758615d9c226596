//! # concrete 命令实现
//!
//! 把真实元素代入抽象 SQS 并写出结构。
//!
//! ## 依赖关系
//! - 使用 `cli/concrete.rs` 定义的参数
//! - 使用 `sqs/substitution.rs`

use super::{load_abstract_sqs, write_concrete};
use crate::cli::concrete::ConcreteArgs;
use crate::error::Result;
use crate::models::ConcreteSqs;
use crate::sqs;
use crate::utils::model::{format_occupancies, format_sublattice_model};
use crate::utils::output;

/// 执行 concrete 命令
pub fn execute(args: ConcreteArgs) -> Result<()> {
    output::print_header("Substituting species into an abstract SQS");

    let abstract_sqs = load_abstract_sqs(&args.input)?;
    output::print_info(&format!(
        "Abstract sublattice model: {}",
        format_sublattice_model(abstract_sqs.sublattice_model())
    ));

    let mut concrete =
        sqs::get_concrete_sqs(&abstract_sqs, &args.model.0, !args.no_scale_volume)?;
    if let Some(indices) = &args.reindex {
        concrete.reindex(indices)?;
    }

    print_summary(&concrete)?;
    write_concrete(&concrete, args.format, &args.output)?;

    output::print_conversion(
        &args.input.display().to_string(),
        &args.output.display().to_string(),
    );
    Ok(())
}

fn print_summary(concrete: &ConcreteSqs) -> Result<()> {
    let structure = &concrete.structure;
    output::print_field("Formula", structure.formula());
    output::print_field("Sites", structure.num_sites());
    output::print_field("Volume", format!("{:.4} Å³", structure.volume()));
    output::print_field("Density", format!("{:.4} g/cm³", structure.density()?));
    output::print_field(
        "Configuration",
        serde_json::to_string(&concrete.espei_sublattice_configuration())?,
    );
    output::print_field(
        "Occupancies",
        format_occupancies(&concrete.sublattice_occupancies),
    );
    output::print_field(
        "Site ratios",
        format!("{:?}", concrete.sublattice_site_ratios),
    );
    Ok(())
}
