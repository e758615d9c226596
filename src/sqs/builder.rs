//! # 抽象 SQS 构建
//!
//! 把 lat.in 的语法解析结果变成 `AbstractSqs`：计算有效晶格，
//! 把 `a_B` 形式的标签拆成 (亚晶格名, 抽象符号)，并推断亚晶格模型。
//!
//! ## 依赖关系
//! - 使用 `parsers/lat_in.rs`
//! - 使用 `models/`

use crate::error::{Result, SqsError};
use crate::models::{AbstractSqs, CrystalStructure, Lattice, Species};
use crate::parsers::lat_in::{self, CoordinateSystem, ParsedLattice};

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// 从 lat.in 文本构建抽象 SQS
///
/// `rename` 必须为 true：不拆分标签就无法区分亚晶格名和物种名。
pub fn lat_in_to_sqs(content: &str, rename: bool) -> Result<AbstractSqs> {
    build_abstract_sqs(&lat_in::parse_lat_in(content)?, rename)
}

/// 从 lat.in 文件构建抽象 SQS
pub fn lat_in_file_to_sqs(path: &Path) -> Result<AbstractSqs> {
    build_abstract_sqs(&lat_in::parse_lat_in_file(path)?, true)
}

/// 由解析结果构建抽象 SQS
pub fn build_abstract_sqs(parsed: &ParsedLattice, rename: bool) -> Result<AbstractSqs> {
    let coordinate_system = match &parsed.coordinate_system {
        CoordinateSystem::Vectors(matrix) => Lattice::from_vectors(*matrix),
        CoordinateSystem::Parameters { lengths, angles } => Lattice::from_parameters(
            lengths[0], lengths[1], lengths[2], angles[0], angles[1], angles[2],
        ),
    };
    let direct = Lattice::from_vectors(parsed.lattice);
    let effective = direct.in_basis(&coordinate_system);

    let mut model: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut species = Vec::with_capacity(parsed.atoms.len());
    let mut positions = Vec::with_capacity(parsed.atoms.len());

    for atom in &parsed.atoms {
        let label = match atom.species.as_slice() {
            [label] => label,
            labels => {
                return Err(SqsError::NotImplemented(format!(
                    "Cannot parse atom list {:?} because the sublattice is unclear",
                    labels
                )))
            }
        };

        if !rename {
            return Err(SqsError::NotImplemented(
                "Cannot keep raw labels because the atom name and sublattice name may be ambiguous"
                    .to_string(),
            ));
        }

        let (sublattice, symbol) = split_label(label)?;
        model
            .entry(sublattice.clone())
            .or_default()
            .insert(symbol.clone());
        species.push(Species::placeholder(sublattice, symbol));
        positions.push(atom.position);
    }

    let sublattice_names: Vec<String> = model.keys().cloned().collect();
    let sublattice_model: Vec<Vec<String>> = model
        .into_values()
        .map(|symbols| symbols.into_iter().collect())
        .collect();

    debug!(
        num_sites = species.len(),
        sublattices = ?sublattice_names,
        volume = effective.volume(),
        "Built abstract SQS"
    );

    // 位置先按直接晶格解释为笛卡尔坐标，再保持分数坐标换成有效晶格
    let structure = CrystalStructure::from_cartesian(direct, species, &positions)?
        .with_lattice(effective);

    AbstractSqs::new(structure, sublattice_model, sublattice_names)
}

/// `aej_Af` -> (`aej`, `af`)
fn split_label(label: &str) -> Result<(String, String)> {
    let lower = label.to_lowercase();
    match lower.split_once('_') {
        Some((sublattice, symbol)) if !sublattice.is_empty() && !symbol.is_empty() => {
            Ok((sublattice.to_string(), symbol.to_string()))
        }
        _ => Err(SqsError::InvalidFormat(format!(
            "Species label '{}' is not of the form <sublattice>_<symbol>",
            label
        ))),
    }
}
