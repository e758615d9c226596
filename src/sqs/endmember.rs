//! # 端元对称性
//!
//! 每个亚晶格只放一种元素得到端元结构，再交给外部对称性服务求空间群。
//! 元素本身无关紧要，只用来区分亚晶格，按周期表顺序取 H, He, Li, ...
//!
//! ## 依赖关系
//! - 使用 `sqs/substitution.rs`
//! - 使用 `symmetry/` 的 `SymmetryAnalyzer`

use super::substitution::get_concrete_sqs;
use crate::elements::PERIODIC_TABLE;
use crate::error::{Result, SqsError};
use crate::models::{AbstractSqs, ConcreteSqs};
use crate::symmetry::{SpaceGroupInfo, SymmetryAnalyzer, SymmetryTolerances};

use tracing::debug;

/// 端元结构：第 i 个亚晶格的所有位置都放周期表中第 i 个元素，不缩放体积
pub fn get_endmember_sqs(sqs: &AbstractSqs) -> Result<ConcreteSqs> {
    let model = sqs.sublattice_model();
    if model.len() > PERIODIC_TABLE.len() {
        return Err(SqsError::InvalidArgument(format!(
            "{} sublattices exceed the {} available placeholder elements",
            model.len(),
            PERIODIC_TABLE.len()
        )));
    }

    let endmember_model: Vec<Vec<String>> = model
        .iter()
        .zip(PERIODIC_TABLE.iter())
        .map(|(subl, element)| vec![element.symbol.to_string(); subl.len()])
        .collect();

    get_concrete_sqs(sqs, &endmember_model, false)
}

/// 端元结构的空间群
pub fn get_endmember_space_group_info(
    sqs: &AbstractSqs,
    analyzer: &dyn SymmetryAnalyzer,
    tolerances: SymmetryTolerances,
) -> Result<SpaceGroupInfo> {
    let endmember = get_endmember_sqs(sqs)?;
    let info = analyzer.space_group(&endmember.structure, tolerances)?;
    debug!(
        symbol = %info.symbol,
        number = info.number,
        symprec = tolerances.symprec,
        "Endmember space group"
    );
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Species;
    use crate::sqs::fixtures::{self, FCC_L12, ROCKSALT_B1};
    use crate::symmetry::testing::FixedAnalyzer;

    #[test]
    fn test_endmember_uses_one_element_per_sublattice() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let endmember = get_endmember_sqs(&sqs).unwrap();

        assert_eq!(
            endmember.sublattice_configuration,
            vec![vec!["H".to_string()], vec!["He".to_string()]]
        );
        let composition = endmember.structure.composition();
        assert_eq!(composition[&Species::element("H")], 8);
        assert_eq!(composition[&Species::element("He")], 24);

        // 几何不变
        assert_eq!(endmember.structure.lattice, sqs.structure().lattice);
    }

    #[test]
    fn test_space_group_is_passed_through() {
        let sqs = fixtures::abstract_sqs(ROCKSALT_B1);
        let analyzer = FixedAnalyzer::new("Fm-3m", 225);
        let tolerances = SymmetryTolerances {
            symprec: 1e-3,
            angle_tolerance: 1.0,
        };

        let info = get_endmember_space_group_info(&sqs, &analyzer, tolerances).unwrap();
        assert_eq!(info.symbol, "Fm-3m");
        assert_eq!(info.number, 225);
        assert_eq!(analyzer.calls(), 1);

        let (structure, used) = analyzer.last_input().unwrap();
        assert_eq!(used, tolerances);
        assert_eq!(structure.num_sites(), 32);
        assert!(structure.sites.iter().all(|s| !s.species.is_placeholder()));
    }
}
