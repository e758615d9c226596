//! # symmetry 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/symmetry.rs` 定义的参数
//! - 使用 `sqs/endmember.rs`

use super::load_abstract_sqs;
use crate::cli::symmetry::SymmetryCmdArgs;
use crate::error::Result;
use crate::sqs;
use crate::utils::model::format_sublattice_model;
use crate::utils::output;

/// 执行 symmetry 命令
pub fn execute(args: SymmetryCmdArgs) -> Result<()> {
    let abstract_sqs = load_abstract_sqs(&args.input)?;
    let endmember = sqs::get_endmember_sqs(&abstract_sqs)?;

    output::print_info(&format!(
        "{}: {} sites, sublattice model {}, endmember {}",
        args.input.display(),
        abstract_sqs.num_sites(),
        format_sublattice_model(abstract_sqs.sublattice_model()),
        endmember.structure.formula()
    ));

    let info = sqs::get_endmember_space_group_info(
        &abstract_sqs,
        &args.symmetry.analyzer(),
        args.symmetry.tolerances(),
    )?;

    output::print_success(&format!("Endmember space group: {}", info));
    Ok(())
}
