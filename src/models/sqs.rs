//! # SQS 数据模型
//!
//! 以组合方式在通用晶体结构上附加亚晶格信息：
//! - `AbstractSqs`: 格点为占位物种的抽象 SQS（只读模板）
//! - `ConcreteSqs`: 已代入真实元素的具体 SQS（终端产物）
//!
//! 以及二者的 JSON 记录格式。
//!
//! ## 依赖关系
//! - 被 `parsers/lat_in.rs`、`sqs/`、`database/`、`commands/` 使用
//! - 使用 `models/structure.rs`
//! - 序列化时调用 `sqs/endmember.rs` 计算端元对称性

use crate::error::{Result, SqsError};
use crate::models::structure::{CrystalStructure, Species};
use crate::sqs;
use crate::symmetry::{SpaceGroupInfo, SymmetryAnalyzer, SymmetryTolerances};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 抽象 SQS
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractSqs {
    structure: CrystalStructure,
    sublattice_model: Vec<Vec<String>>,
    sublattice_names: Vec<String>,
}

impl AbstractSqs {
    /// 创建抽象 SQS 并校验：
    /// - 亚晶格模型与亚晶格名长度一致
    /// - 所有格点都是占位物种，且出现在亚晶格模型中
    /// - 模型中的每个 (亚晶格, 符号) 至少占据一个格点
    pub fn new(
        structure: CrystalStructure,
        sublattice_model: Vec<Vec<String>>,
        sublattice_names: Vec<String>,
    ) -> Result<Self> {
        if sublattice_model.len() != sublattice_names.len() {
            return Err(SqsError::InvalidFormat(format!(
                "Sublattice model {:?} and sublattice names {:?} differ in length",
                sublattice_model, sublattice_names
            )));
        }

        let sqs = AbstractSqs {
            structure,
            sublattice_model,
            sublattice_names,
        };

        let counts = sqs.placeholder_counts()?;
        for (name, subl) in sqs.sublattice_names.iter().zip(&sqs.sublattice_model) {
            for symbol in subl {
                if !counts.contains_key(&(name.clone(), symbol.clone())) {
                    return Err(SqsError::InvalidFormat(format!(
                        "Abstract species '{}' of sublattice '{}' occupies no site",
                        symbol, name
                    )));
                }
            }
        }
        let known: usize = sqs.sublattice_model.iter().map(|s| s.len()).sum();
        if counts.len() != known {
            return Err(SqsError::InvalidFormat(format!(
                "Structure contains placeholder species outside the sublattice model {:?}",
                sqs.sublattice_model
            )));
        }

        Ok(sqs)
    }

    pub fn structure(&self) -> &CrystalStructure {
        &self.structure
    }

    /// 抽象亚晶格模型，例如 `[['a', 'b'], ['a']]`
    pub fn sublattice_model(&self) -> &[Vec<String>] {
        &self.sublattice_model
    }

    /// 亚晶格名，例如 `['a', 'c']`
    pub fn sublattice_names(&self) -> &[String] {
        &self.sublattice_names
    }

    pub fn num_sites(&self) -> usize {
        self.structure.num_sites()
    }

    /// 每个 (亚晶格名, 抽象符号) 的格点数
    fn placeholder_counts(&self) -> Result<BTreeMap<(String, String), usize>> {
        let mut counts = BTreeMap::new();
        for site in &self.structure.sites {
            match &site.species {
                Species::Placeholder { sublattice, symbol } => {
                    *counts
                        .entry((sublattice.clone(), symbol.clone()))
                        .or_insert(0) += 1;
                }
                other => {
                    return Err(SqsError::InvalidFormat(format!(
                        "Abstract SQS contains the real species '{}'",
                        other
                    )))
                }
            }
        }
        Ok(counts)
    }

    fn count_of(counts: &BTreeMap<(String, String), usize>, name: &str, symbol: &str) -> usize {
        counts
            .get(&(name.to_string(), symbol.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// 归一化的亚晶格位点比，例如 `[[0.125, 0.125], [0.75]]`
    pub fn normalized_sublattice_site_ratios(&self) -> Vec<Vec<f64>> {
        let counts = self.placeholder_counts().unwrap_or_default();
        let total = self.num_sites() as f64;
        self.sublattice_names
            .iter()
            .zip(&self.sublattice_model)
            .map(|(name, subl)| {
                subl.iter()
                    .map(|symbol| Self::count_of(&counts, name, symbol) as f64 / total)
                    .collect()
            })
            .collect()
    }

    /// 约化化学式下的整数位点比，例如 `[[1, 1], [6]]`
    pub fn sublattice_site_ratios(&self) -> Vec<Vec<u64>> {
        let counts = self.placeholder_counts().unwrap_or_default();
        let divisor = counts
            .values()
            .fold(0u64, |acc, &c| gcd(acc, c as u64))
            .max(1);
        self.sublattice_names
            .iter()
            .zip(&self.sublattice_model)
            .map(|(name, subl)| {
                subl.iter()
                    .map(|symbol| Self::count_of(&counts, name, symbol) as u64 / divisor)
                    .collect()
            })
            .collect()
    }

    /// 序列化为记录，端元对称性在每次调用时重新计算
    pub fn to_record(
        &self,
        analyzer: &dyn SymmetryAnalyzer,
        tolerances: SymmetryTolerances,
    ) -> Result<AbstractSqsRecord> {
        let symmetry = sqs::get_endmember_space_group_info(self, analyzer, tolerances)?;
        Ok(AbstractSqsRecord {
            structure: self.structure.clone(),
            sublattice_model: self.sublattice_model.clone(),
            sublattice_names: self.sublattice_names.clone(),
            sublattice_site_ratios: self.sublattice_site_ratios(),
            symmetry,
        })
    }

    /// 从记录恢复；对称性是派生量，不恢复
    pub fn from_record(record: AbstractSqsRecord) -> Result<Self> {
        AbstractSqs::new(
            record.structure,
            record.sublattice_model,
            record.sublattice_names,
        )
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// 抽象 SQS 的 JSON 记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractSqsRecord {
    #[serde(flatten)]
    pub structure: CrystalStructure,
    pub sublattice_model: Vec<Vec<String>>,
    pub sublattice_names: Vec<String>,
    pub sublattice_site_ratios: Vec<Vec<u64>>,
    pub symmetry: SpaceGroupInfo,
}

impl AbstractSqsRecord {
    /// 每个亚晶格的总位点比，例如 `[2, 6]`
    pub fn total_site_ratios(&self) -> Vec<f64> {
        self.sublattice_site_ratios
            .iter()
            .map(|r| r.iter().sum::<u64>() as f64)
            .collect()
    }
}

/// ESPEI 风格的亚晶格项：单一元素的亚晶格写成标量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EspeiSublattice<T> {
    Pure(T),
    Mixed(Vec<T>),
}

impl<T: Clone> EspeiSublattice<T> {
    fn from_slice(values: &[T]) -> Self {
        match values {
            [single] => EspeiSublattice::Pure(single.clone()),
            _ => EspeiSublattice::Mixed(values.to_vec()),
        }
    }
}

/// 具体 SQS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteSqs {
    #[serde(flatten)]
    pub structure: CrystalStructure,

    /// 亚晶格构型，例如 `[['Fe', 'Ni'], ['Fe']]`
    pub sublattice_configuration: Vec<Vec<String>>,

    /// 各元素在亚晶格中的占比，例如 `[[0.3333, 0.6666], [1]]`
    pub sublattice_occupancies: Vec<Vec<f64>>,

    /// 亚晶格多重度，例如 `[3, 1]`
    pub sublattice_site_ratios: Vec<f64>,
}

impl ConcreteSqs {
    pub fn new(
        structure: CrystalStructure,
        sublattice_configuration: Vec<Vec<String>>,
        sublattice_occupancies: Vec<Vec<f64>>,
        sublattice_site_ratios: Vec<f64>,
    ) -> Result<Self> {
        let n = sublattice_configuration.len();
        let shapes_match = sublattice_occupancies.len() == n
            && sublattice_site_ratios.len() == n
            && sublattice_configuration
                .iter()
                .zip(&sublattice_occupancies)
                .all(|(c, o)| c.len() == o.len());
        if !shapes_match {
            return Err(SqsError::InvalidFormat(format!(
                "Inconsistent sublattice data: configuration {:?}, occupancies {:?}, site ratios {:?}",
                sublattice_configuration, sublattice_occupancies, sublattice_site_ratios
            )));
        }

        Ok(ConcreteSqs {
            structure,
            sublattice_configuration,
            sublattice_occupancies,
            sublattice_site_ratios,
        })
    }

    /// ESPEI 格式的亚晶格构型，例如 `[['Al', 'Ni'], 'Fe']`
    pub fn espei_sublattice_configuration(&self) -> Vec<EspeiSublattice<String>> {
        self.sublattice_configuration
            .iter()
            .map(|s| EspeiSublattice::from_slice(s))
            .collect()
    }

    /// ESPEI 格式的占比，例如 `[[0.5, 0.5], 1.0]`
    pub fn espei_sublattice_occupancies(&self) -> Vec<EspeiSublattice<f64>> {
        self.sublattice_occupancies
            .iter()
            .map(|s| EspeiSublattice::from_slice(s))
            .collect()
    }

    /// 按给定顺序重排三个亚晶格列表
    pub fn reindex(&mut self, new_indices: &[usize]) -> Result<()> {
        let (configuration, occupancies, site_ratios) = reindex_sublattice(
            new_indices,
            &self.sublattice_configuration,
            &self.sublattice_occupancies,
            &self.sublattice_site_ratios,
        )?;
        self.sublattice_configuration = configuration;
        self.sublattice_occupancies = occupancies;
        self.sublattice_site_ratios = site_ratios;
        Ok(())
    }
}

/// 重排亚晶格构型、占比和位点比
///
/// `new_indices` 必须是 `0..N` 的一个排列。
/// 例如 `[1, 0]` 把 `[['Al', 'Ni'], ['Al']]` 变为 `[['Al'], ['Al', 'Ni']]`。
pub fn reindex_sublattice(
    new_indices: &[usize],
    configuration: &[Vec<String>],
    occupancies: &[Vec<f64>],
    site_ratios: &[f64],
) -> Result<(Vec<Vec<String>>, Vec<Vec<f64>>, Vec<f64>)> {
    let expected: Vec<usize> = (0..configuration.len()).collect();
    let mut sorted = new_indices.to_vec();
    sorted.sort_unstable();
    if sorted != expected
        || occupancies.len() != expected.len()
        || site_ratios.len() != expected.len()
    {
        return Err(SqsError::InvalidReindex {
            given: new_indices.to_vec(),
            expected,
        });
    }

    Ok((
        new_indices.iter().map(|&i| configuration[i].clone()).collect(),
        new_indices.iter().map(|&i| occupancies[i].clone()).collect(),
        new_indices.iter().map(|&i| site_ratios[i]).collect(),
    ))
}
