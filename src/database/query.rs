//! # 数据库查询
//!
//! 给定目标亚晶格模型和位点比，找出可以代入的抽象 SQS。
//!
//! 记录的亚晶格数可以多于查询：几个记录亚晶格合并成一个查询亚晶格
//! （例如 B1 的两个亚晶格都放同一组元素）。匹配条件：
//! 1. 可选：端元空间群符号相同
//! 2. 每个记录亚晶格分到一个查询亚晶格，每个查询亚晶格至少分到一个
//! 3. 合并后的位点比与查询位点比成比例
//! 4. 记录亚晶格的占位数不超过所分到的查询亚晶格的元素数
//!
//! 分组按字典序搜索，取第一个满足条件的。
//!
//! ## 依赖关系
//! - 使用 `database/mod.rs`
//! - 使用 `itertools` 生成分组

use super::{DatabaseEntry, SqsDatabase};
use crate::error::{Result, SqsError};

use itertools::Itertools;
use tracing::debug;

/// 比例判定的相对容差
const RATIO_TOLERANCE: f64 = 1e-6;

/// 一条匹配结果
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseMatch<'a> {
    pub entry: &'a DatabaseEntry,
    /// `grouping[i]` 为记录第 i 个亚晶格所属的查询亚晶格
    pub grouping: Vec<usize>,
    /// 按记录亚晶格展开的溶液模型，可直接用于 `enumerate_sqs`
    pub solution_sublattice_model: Vec<Vec<String>>,
}

/// 查询与亚晶格模型和位点比相容的抽象 SQS
pub fn structures_from_database<'a>(
    db: &'a SqsDatabase,
    sublattice_model: &[Vec<String>],
    site_ratios: &[f64],
    symmetry: Option<&str>,
) -> Result<Vec<DatabaseMatch<'a>>> {
    if sublattice_model.len() != site_ratios.len() {
        return Err(SqsError::InvalidArgument(format!(
            "Sublattice model {:?} and site ratios {:?} differ in length",
            sublattice_model, site_ratios
        )));
    }
    if sublattice_model.is_empty() {
        return Err(SqsError::InvalidArgument(
            "Sublattice model must contain at least one sublattice".to_string(),
        ));
    }

    let matches: Vec<DatabaseMatch> = db
        .entries()
        .iter()
        .filter(|entry| symmetry.map_or(true, |s| entry.record.symmetry.symbol == s))
        .filter_map(|entry| {
            find_grouping(entry, sublattice_model, site_ratios).map(|grouping| {
                let solution_sublattice_model = grouping
                    .iter()
                    .map(|&j| sublattice_model[j].clone())
                    .collect();
                DatabaseMatch {
                    entry,
                    grouping,
                    solution_sublattice_model,
                }
            })
        })
        .collect();

    debug!(
        records = db.len(),
        matches = matches.len(),
        "Queried SQS database"
    );
    Ok(matches)
}

/// 字典序第一个满足条件的分组
fn find_grouping(
    entry: &DatabaseEntry,
    sublattice_model: &[Vec<String>],
    site_ratios: &[f64],
) -> Option<Vec<usize>> {
    let record = &entry.record;
    let n_query = sublattice_model.len();
    let n_record = record.sublattice_model.len();
    if n_record < n_query || record.sublattice_site_ratios.len() != n_record {
        return None;
    }

    let record_ratios = record.total_site_ratios();

    (0..n_record)
        .map(|_| 0..n_query)
        .multi_cartesian_product()
        .find(|grouping| {
            is_surjective(grouping, n_query)
                && slots_fit(grouping, &record.sublattice_model, sublattice_model)
                && ratios_proportional(grouping, &record_ratios, site_ratios)
        })
}

fn is_surjective(grouping: &[usize], n_query: usize) -> bool {
    (0..n_query).all(|j| grouping.contains(&j))
}

fn slots_fit(grouping: &[usize], record_model: &[Vec<String>], query: &[Vec<String>]) -> bool {
    grouping
        .iter()
        .zip(record_model)
        .all(|(&j, slots)| slots.len() <= query[j].len())
}

fn ratios_proportional(grouping: &[usize], record_ratios: &[f64], query_ratios: &[f64]) -> bool {
    let mut grouped = vec![0.0; query_ratios.len()];
    for (&j, ratio) in grouping.iter().zip(record_ratios) {
        grouped[j] += ratio;
    }

    // grouped[j] / query[j] 对所有 j 相同
    let scale = grouped[0] / query_ratios[0];
    grouped.iter().zip(query_ratios).all(|(g, q)| {
        let expected = scale * q;
        (g - expected).abs() <= RATIO_TOLERANCE * expected.abs().max(g.abs())
    })
}
