//! # VASP POSCAR 格式输出
//!
//! 把晶体结构写成 VASP POSCAR，供后续 DFT 计算使用。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+)
//! n1 n2 ...              # number of atoms per element
//! Direct                 # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/concrete.rs`、`commands/enumerate.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{Result, SqsError};
use crate::models::CrystalStructure;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 将结构转换为 POSCAR 格式字符串
///
/// 物种按首次出现的顺序分组；占位物种写成 `X<亚晶格><符号>`。
pub fn to_poscar_string(structure: &CrystalStructure, comment: &str) -> String {
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Vec<[f64; 3]>> = BTreeMap::new();

    for site in &structure.sites {
        let token = site.species.token();
        if !order.contains(&token) {
            order.push(token.clone());
        }
        groups.entry(token).or_default().push(site.frac_coords);
    }

    let mut result = String::new();

    // Line 0: Comment
    result.push_str(&format!("{}\n", comment));

    // Line 1: Scale
    result.push_str("1.0\n");

    // Lines 2-4: Lattice
    for row in &structure.lattice.matrix {
        result.push_str(&format!(
            "  {:16.10}  {:16.10}  {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }

    // Species and counts
    result.push_str(&format!("   {}\n", order.join("   ")));
    let counts: Vec<String> = order
        .iter()
        .map(|t| groups.get(t).map_or(0, |v| v.len()).to_string())
        .collect();
    result.push_str(&format!("   {}\n", counts.join("   ")));

    result.push_str("Direct\n");

    for token in &order {
        for pos in groups.get(token).into_iter().flatten() {
            result.push_str(&format!(
                "  {:16.10}  {:16.10}  {:16.10}\n",
                pos[0], pos[1], pos[2]
            ));
        }
    }

    result
}

/// 写出 POSCAR 文件
pub fn write_poscar_file(structure: &CrystalStructure, comment: &str, path: &Path) -> Result<()> {
    fs::write(path, to_poscar_string(structure, comment)).map_err(|e| SqsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
