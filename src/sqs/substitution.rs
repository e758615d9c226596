//! # 亚晶格代入
//!
//! 按位置对应关系把抽象 SQS 的占位符号替换成真实元素，计算各亚晶格的占比，
//! 并可选地按元素固态密度缩放晶胞体积。
//!
//! 体积缩放只是粗略的估计：把晶胞密度调到各元素固态密度按摩尔分数的加权平均，
//! 并不是状态方程。
//!
//! ## 依赖关系
//! - 使用 `models/`
//! - 使用 `elements.rs` 获取固态密度

use crate::elements;
use crate::error::{Result, SqsError};
use crate::models::{AbstractSqs, ConcreteSqs, CrystalStructure, Species};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, instrument};

/// 由抽象 SQS 和具体亚晶格模型生成具体 SQS
///
/// `concrete_model` 必须与抽象亚晶格模型形状相同，第 i 个元素替换第 i 个抽象符号，
/// 例如 `[['Fe', 'Ni'], ['Al']]` 与 `[['Ni', 'Fe'], ['Al']]` 得到不同的结构。
#[instrument(skip_all, fields(model = ?concrete_model, scale_volume = scale_volume))]
pub fn get_concrete_sqs(
    sqs: &AbstractSqs,
    concrete_model: &[Vec<String>],
    scale_volume: bool,
) -> Result<ConcreteSqs> {
    let abstract_model = sqs.sublattice_model();
    let shapes_match = concrete_model.len() == abstract_model.len()
        && concrete_model
            .iter()
            .zip(abstract_model)
            .all(|(c, a)| c.len() == a.len());
    if !shapes_match {
        return Err(SqsError::SublatticeMismatch {
            concrete: concrete_model.to_vec(),
            abstract_model: abstract_model.to_vec(),
        });
    }

    let site_ratios = sqs.sublattice_site_ratios();

    let mut replacements: HashMap<Species, Species> = HashMap::new();
    let mut occupancies: Vec<BTreeMap<&str, f64>> = Vec::with_capacity(concrete_model.len());

    for (((abstract_subl, concrete_subl), name), ratios) in abstract_model
        .iter()
        .zip(concrete_model)
        .zip(sqs.sublattice_names())
        .zip(&site_ratios)
    {
        let ratio_sum: u64 = ratios.iter().sum();
        let mut subl_occupancy = BTreeMap::new();

        for ((abstract_symbol, element), &ratio) in
            abstract_subl.iter().zip(concrete_subl).zip(ratios)
        {
            replacements.insert(
                Species::placeholder(name.as_str(), abstract_symbol.as_str()),
                Species::element(element.as_str()),
            );
            // 同一亚晶格里重复出现的元素合并占比
            *subl_occupancy.entry(element.as_str()).or_insert(0.0) +=
                ratio as f64 / ratio_sum as f64;
        }
        occupancies.push(subl_occupancy);
    }

    let mut structure = sqs
        .structure()
        .map_species(|sp| replacements.get(sp).cloned().unwrap_or_else(|| sp.clone()));

    if scale_volume {
        structure = scale_to_estimated_density(&structure)?;
    }

    let sublattice_configuration: Vec<Vec<String>> = concrete_model
        .iter()
        .map(|subl| {
            subl.iter()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
        .collect();

    let sublattice_occupancies: Vec<Vec<f64>> = sublattice_configuration
        .iter()
        .zip(&occupancies)
        .map(|(subl, occ)| {
            subl.iter()
                .map(|element| occ.get(element.as_str()).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    let sublattice_site_ratios: Vec<f64> = site_ratios
        .iter()
        .map(|r| r.iter().sum::<u64>() as f64)
        .collect();

    ConcreteSqs::new(
        structure,
        sublattice_configuration,
        sublattice_occupancies,
        sublattice_site_ratios,
    )
}

/// 把晶胞体积缩放到各元素固态密度的加权平均所对应的体积
fn scale_to_estimated_density(structure: &CrystalStructure) -> Result<CrystalStructure> {
    let mut estimated_density = 0.0;
    for (symbol, fraction) in structure.fractional_composition()? {
        estimated_density += fraction * elements::lookup(&symbol)?.density_g_cm3()?;
    }

    let volume = structure.volume();
    let new_volume = volume / estimated_density * structure.density()?;

    debug!(
        estimated_density,
        old_volume = volume,
        new_volume,
        "Scaling cell to estimated density"
    );

    Ok(structure.scaled_to_volume(new_volume))
}
