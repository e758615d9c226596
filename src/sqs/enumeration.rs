//! # SQS 枚举
//!
//! 给定一个溶液亚晶格模型（每个亚晶格的候选元素可以多于 SQS 的占位符号数），
//! 生成所有代入方式，构建对应的具体 SQS 并去重。
//!
//! ## 算法
//! 1. 每个亚晶格：候选元素按占位符号数取有序排列
//!    （`endmembers` 时允许重复，包含单一元素的端元代入）
//! 2. 各亚晶格的候选做笛卡尔积，按字典序遍历
//! 3. 逐个代入，按 (构型, 占比, 逐格点物种) 去重
//!
//! ## 依赖关系
//! - 使用 `sqs/substitution.rs`
//! - 使用 `sqs/progress.rs` 报告进度
//! - 使用 `itertools` 生成排列和笛卡尔积

use super::progress::{Progress, ProgressReporter};
use super::substitution::get_concrete_sqs;
use crate::error::{Result, SqsError};
use crate::models::{AbstractSqs, ConcreteSqs};

use itertools::Itertools;
use std::collections::HashSet;
use tracing::{info, instrument};

/// 占比比较的精度
const OCCUPANCY_GRID: f64 = 1e9;

/// 枚举选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationOptions {
    /// 是否包含某个亚晶格只剩一种元素的端元代入
    pub endmembers: bool,
    /// 是否按元素密度缩放体积
    pub scale_volume: bool,
    /// 溶液模型阶数低于 SQS 时返回空结果而不是报错
    pub skip_on_failure: bool,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        EnumerationOptions {
            endmembers: true,
            scale_volume: true,
            skip_on_failure: false,
        }
    }
}

type DedupKey = (Vec<Vec<String>>, Vec<Vec<i64>>, Vec<String>);

/// 枚举所有与溶液模型相容的具体 SQS
#[instrument(skip_all, fields(solution = ?solution_model, endmembers = options.endmembers))]
pub fn enumerate_sqs(
    sqs: &AbstractSqs,
    solution_model: &[Vec<String>],
    options: &EnumerationOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<ConcreteSqs>> {
    let abstract_model = sqs.sublattice_model();

    if solution_model.len() != abstract_model.len() {
        return Err(SqsError::SublatticeMismatch {
            concrete: solution_model.to_vec(),
            abstract_model: abstract_model.to_vec(),
        });
    }

    let lower_order = solution_model
        .iter()
        .zip(abstract_model)
        .any(|(solution, slots)| solution.len() < slots.len());
    if lower_order {
        if options.skip_on_failure {
            info!("Solution model is of lower order than the SQS, skipping");
            return Ok(Vec::new());
        }
        return Err(SqsError::LowerOrderModel {
            solution: solution_model.to_vec(),
            abstract_model: abstract_model.to_vec(),
        });
    }

    let candidates: Vec<Vec<Vec<String>>> = solution_model
        .iter()
        .zip(abstract_model)
        .map(|(solution, slots)| sublattice_candidates(solution, slots.len(), options.endmembers))
        .multi_cartesian_product()
        .collect();

    info!(candidates = candidates.len(), "Enumerating SQS");
    reporter.report(Progress::TaskStart {
        total_steps: candidates.len() as u64,
    });

    let mut seen: HashSet<DedupKey> = HashSet::new();
    let mut structures = Vec::new();
    let mut filtered = 0usize;
    let mut duplicates = 0usize;

    for candidate in &candidates {
        reporter.report(Progress::TaskIncrement);

        if !options.endmembers && collapses_to_endmember(candidate, abstract_model) {
            filtered += 1;
            continue;
        }

        let concrete = get_concrete_sqs(sqs, candidate, options.scale_volume)?;
        if seen.insert(dedup_key(&concrete)) {
            structures.push(concrete);
        } else {
            duplicates += 1;
        }
    }

    reporter.report(Progress::TaskFinish);
    info!(
        structures = structures.len(),
        duplicates, filtered, "Enumeration finished"
    );

    Ok(structures)
}

/// 单个亚晶格的所有有序代入
fn sublattice_candidates(species: &[String], slots: usize, endmembers: bool) -> Vec<Vec<String>> {
    if endmembers {
        itertools::repeat_n(species.iter().cloned(), slots)
            .multi_cartesian_product()
            .collect()
    } else {
        species.iter().cloned().permutations(slots).collect()
    }
}

/// 多个占位符号的亚晶格是否全部被同一种元素占据
fn collapses_to_endmember(candidate: &[Vec<String>], abstract_model: &[Vec<String>]) -> bool {
    candidate
        .iter()
        .zip(abstract_model)
        .any(|(subl, slots)| slots.len() > 1 && subl.iter().all_equal())
}

fn dedup_key(concrete: &ConcreteSqs) -> DedupKey {
    let occupancies = concrete
        .sublattice_occupancies
        .iter()
        .map(|subl| {
            subl.iter()
                .map(|x| (x * OCCUPANCY_GRID).round() as i64)
                .collect()
        })
        .collect();
    let sites = concrete
        .structure
        .sites
        .iter()
        .map(|s| s.species.token())
        .collect();
    (
        concrete.sublattice_configuration.clone(),
        occupancies,
        sites,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrystalStructure, Lattice, Site, Species};
    use crate::sqs::fixtures::{self, FCC_L12, ROCKSALT_B1};
    use std::sync::Mutex;

    fn strings(model: &[&[&str]]) -> Vec<Vec<String>> {
        model
            .iter()
            .map(|s| s.iter().map(|x| x.to_string()).collect())
            .collect()
    }

    fn options(endmembers: bool) -> EnumerationOptions {
        EnumerationOptions {
            endmembers,
            scale_volume: false,
            skip_on_failure: false,
        }
    }

    fn enumerate(sqs: &AbstractSqs, model: &[&[&str]], opts: EnumerationOptions) -> Result<Vec<ConcreteSqs>> {
        enumerate_sqs(sqs, &strings(model), &opts, &ProgressReporter::new())
    }

    #[test]
    fn test_default_options() {
        let opts = EnumerationOptions::default();
        assert!(opts.endmembers);
        assert!(opts.scale_volume);
        assert!(!opts.skip_on_failure);
    }

    #[test]
    fn test_l12_enumeration_counts() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let model: &[&[&str]] = &[&["Al", "Ni"], &["Fe", "Cr"]];

        let structures = enumerate(&sqs, model, options(false)).unwrap();
        assert_eq!(structures.len(), 4);

        let structures = enumerate(&sqs, model, options(true)).unwrap();
        assert_eq!(structures.len(), 8);
    }

    #[test]
    fn test_b1_enumeration_counts() {
        let sqs = fixtures::abstract_sqs(ROCKSALT_B1);
        let model: &[&[&str]] = &[&["Al", "Ni"], &["Fe", "Cr"]];

        assert_eq!(enumerate(&sqs, model, options(false)).unwrap().len(), 4);
        assert_eq!(enumerate(&sqs, model, options(true)).unwrap().len(), 16);
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let model: &[&[&str]] = &[&["Al", "Ni"], &["Fe", "Cr"]];
        let first = enumerate(&sqs, model, options(true)).unwrap();
        let second = enumerate(&sqs, model, options(true)).unwrap();
        assert_eq!(first, second);

        // 字典序：第一个候选是 [Al, Al], [Fe]
        assert_eq!(
            first[0].sublattice_configuration,
            strings(&[&["Al"], &["Fe"]])
        );
    }

    #[test]
    fn test_higher_order_solution() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let structures = enumerate(&sqs, &[&["Al", "Ni", "Co"], &["Fe"]], options(false)).unwrap();
        // 3 × 2 个排列
        assert_eq!(structures.len(), 6);
        for s in &structures {
            assert_eq!(s.sublattice_configuration[0].len(), 2);
            for occ in &s.sublattice_occupancies {
                assert!((occ.iter().sum::<f64>() - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_lower_order_model() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        match enumerate(&sqs, &[&["Fe"], &["Al"]], options(false)) {
            Err(SqsError::LowerOrderModel {
                solution,
                abstract_model,
            }) => {
                assert_eq!(solution, strings(&[&["Fe"], &["Al"]]));
                assert_eq!(abstract_model, strings(&[&["a", "b"], &["a"]]));
            }
            other => panic!("expected LowerOrderModel, got {:?}", other),
        }

        let skipping = EnumerationOptions {
            skip_on_failure: true,
            ..options(false)
        };
        assert!(enumerate(&sqs, &[&["Fe"], &["Al"]], skipping)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_outer_mismatch_is_not_skippable() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let skipping = EnumerationOptions {
            skip_on_failure: true,
            ..options(false)
        };
        assert!(matches!(
            enumerate(&sqs, &[&["Fe", "Ni"]], skipping),
            Err(SqsError::SublatticeMismatch { .. })
        ));
    }

    #[test]
    fn test_repeated_species_are_deduplicated() {
        let sqs = fixtures::abstract_sqs(FCC_L12);

        // (Al, Al) 在笛卡尔幂中出现四次，只保留一个
        let structures = enumerate(&sqs, &[&["Al", "Al"], &["Fe"]], options(true)).unwrap();
        assert_eq!(structures.len(), 1);
        assert_eq!(
            structures[0].sublattice_configuration,
            strings(&[&["Al"], &["Fe"]])
        );

        // 不要端元时全部被过滤
        let structures = enumerate(&sqs, &[&["Al", "Al"], &["Fe"]], options(false)).unwrap();
        assert!(structures.is_empty());
    }

    #[test]
    fn test_endmember_filter() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let structures = enumerate(&sqs, &[&["Al", "Ni"], &["Fe"]], options(false)).unwrap();
        assert!(structures
            .iter()
            .all(|s| s.sublattice_configuration[0].len() == 2));

        let structures = enumerate(&sqs, &[&["Al", "Ni"], &["Fe"]], options(true)).unwrap();
        assert_eq!(structures.len(), 4);
        assert!(structures
            .iter()
            .any(|s| s.sublattice_configuration[0] == vec!["Ni".to_string()]));
    }

    #[test]
    fn test_same_configuration_with_different_occupancies_is_kept() {
        // 亚晶格 a：占位 a 1 个格点，占位 b 3 个格点
        let structure = CrystalStructure::new(
            Lattice::cubic(4.0),
            vec![
                Site::new(Species::placeholder("a", "a"), [0.0, 0.0, 0.0]),
                Site::new(Species::placeholder("a", "b"), [0.5, 0.5, 0.0]),
                Site::new(Species::placeholder("a", "b"), [0.5, 0.0, 0.5]),
                Site::new(Species::placeholder("a", "b"), [0.0, 0.5, 0.5]),
            ],
        );
        let sqs = AbstractSqs::new(structure, strings(&[&["a", "b"]]), vec!["a".to_string()])
            .unwrap();

        let structures = enumerate(&sqs, &[&["Al", "Ni"]], options(false)).unwrap();
        assert_eq!(structures.len(), 2);
        assert_eq!(
            structures[0].sublattice_configuration,
            structures[1].sublattice_configuration
        );
        assert_eq!(structures[0].sublattice_occupancies, vec![vec![0.25, 0.75]]);
        assert_eq!(structures[1].sublattice_occupancies, vec![vec![0.75, 0.25]]);
    }

    #[test]
    fn test_progress_events() {
        let sqs = fixtures::abstract_sqs(FCC_L12);
        let events = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|e| {
                events.lock().unwrap().push(e);
            }));
            enumerate_sqs(
                &sqs,
                &strings(&[&["Al", "Ni"], &["Fe", "Cr"]]),
                &options(true),
                &reporter,
            )
            .unwrap();
        }
        let events = events.into_inner().unwrap();
        assert_eq!(events.first(), Some(&Progress::TaskStart { total_steps: 8 }));
        assert_eq!(events.last(), Some(&Progress::TaskFinish));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == Progress::TaskIncrement)
                .count(),
            8
        );
    }

    #[test]
    fn test_sublattice_candidates() {
        let species = vec!["A".to_string(), "B".to_string()];
        assert_eq!(sublattice_candidates(&species, 2, false).len(), 2);
        assert_eq!(sublattice_candidates(&species, 2, true).len(), 4);
        assert_eq!(sublattice_candidates(&species, 1, true).len(), 2);
    }
}
