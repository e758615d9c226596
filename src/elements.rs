//! # 元素物性数据库
//!
//! 提供元素的原子序数、原子质量和固态密度，用于体积缩放和对称性分析。
//!
//! ## 数据来源
//! - 原子质量: IUPAC 标准原子量 (与 pymatgen periodic_table 一致)
//! - 固态密度: WebElements "Density of solid" (kg/m³)
//!
//! ## 依赖关系
//! - 被 `sqs/substitution.rs` 调用计算体积缩放
//! - 被 `sqs/endmember.rs` 调用获取端元占位元素
//! - 被 `symmetry/spglib.rs` 调用获取原子序数
//! - 纯静态数据，无外部依赖

use crate::error::{Result, SqsError};

use std::collections::HashMap;
use std::sync::LazyLock;

/// 1 amu 对应的克数 × 10^24 (CODATA 2014)
///
/// 密度 (g/cm³) = 质量 (amu) × AMU_G_PER_CM3 / 体积 (Å³)
pub const AMU_G_PER_CM3: f64 = 1.660_539_04;

/// 单个元素的物性数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// 元素符号
    pub symbol: &'static str,
    /// 原子序数
    pub atomic_number: u32,
    /// 原子质量 (amu)
    pub atomic_mass: f64,
    /// 固态密度 (kg/m³)，无数据时为 None
    pub solid_density: Option<f64>,
}

impl Element {
    /// 固态密度 (g/cm³)
    pub fn density_g_cm3(&self) -> Result<f64> {
        self.solid_density
            .map(|d| d / 1000.0)
            .ok_or_else(|| SqsError::MissingProperty {
                element: self.symbol.to_string(),
                property: "Density of solid",
            })
    }
}

const fn el(symbol: &'static str, z: u32, mass: f64, density: Option<f64>) -> Element {
    Element {
        symbol,
        atomic_number: z,
        atomic_mass: mass,
        solid_density: density,
    }
}

/// 按周期表顺序排列的元素表
pub static PERIODIC_TABLE: [Element; 94] = [
    // --- Period 1 ---
    el("H", 1, 1.00794, Some(88.0)),
    el("He", 2, 4.002602, Some(214.0)),
    // --- Period 2 ---
    el("Li", 3, 6.941, Some(535.0)),
    el("Be", 4, 9.012182, Some(1848.0)),
    el("B", 5, 10.811, Some(2460.0)),
    el("C", 6, 12.0107, Some(2267.0)),
    el("N", 7, 14.0067, Some(1026.0)),
    el("O", 8, 15.9994, Some(1495.0)),
    el("F", 9, 18.9984032, Some(1700.0)),
    el("Ne", 10, 20.1797, Some(1444.0)),
    // --- Period 3 ---
    el("Na", 11, 22.98976928, Some(968.0)),
    el("Mg", 12, 24.3050, Some(1738.0)),
    el("Al", 13, 26.9815386, Some(2700.0)),
    el("Si", 14, 28.0855, Some(2330.0)),
    el("P", 15, 30.973762, Some(1823.0)),
    el("S", 16, 32.065, Some(1960.0)),
    el("Cl", 17, 35.453, Some(2030.0)),
    el("Ar", 18, 39.948, Some(1616.0)),
    // --- Period 4 ---
    el("K", 19, 39.0983, Some(856.0)),
    el("Ca", 20, 40.078, Some(1550.0)),
    el("Sc", 21, 44.955912, Some(2985.0)),
    el("Ti", 22, 47.867, Some(4507.0)),
    el("V", 23, 50.9415, Some(6110.0)),
    el("Cr", 24, 51.9961, Some(7140.0)),
    el("Mn", 25, 54.938045, Some(7470.0)),
    el("Fe", 26, 55.845, Some(7874.0)),
    el("Co", 27, 58.933195, Some(8900.0)),
    el("Ni", 28, 58.6934, Some(8908.0)),
    el("Cu", 29, 63.546, Some(8920.0)),
    el("Zn", 30, 65.38, Some(7140.0)),
    el("Ga", 31, 69.723, Some(5904.0)),
    el("Ge", 32, 72.64, Some(5323.0)),
    el("As", 33, 74.92160, Some(5727.0)),
    el("Se", 34, 78.96, Some(4819.0)),
    el("Br", 35, 79.904, Some(4050.0)),
    el("Kr", 36, 83.798, Some(2155.0)),
    // --- Period 5 ---
    el("Rb", 37, 85.4678, Some(1532.0)),
    el("Sr", 38, 87.62, Some(2630.0)),
    el("Y", 39, 88.90585, Some(4472.0)),
    el("Zr", 40, 91.224, Some(6511.0)),
    el("Nb", 41, 92.90638, Some(8570.0)),
    el("Mo", 42, 95.96, Some(10280.0)),
    el("Tc", 43, 98.0, Some(11500.0)),
    el("Ru", 44, 101.07, Some(12370.0)),
    el("Rh", 45, 102.90550, Some(12450.0)),
    el("Pd", 46, 106.42, Some(12023.0)),
    el("Ag", 47, 107.8682, Some(10490.0)),
    el("Cd", 48, 112.411, Some(8650.0)),
    el("In", 49, 114.818, Some(7310.0)),
    el("Sn", 50, 118.710, Some(7310.0)),
    el("Sb", 51, 121.760, Some(6697.0)),
    el("Te", 52, 127.60, Some(6240.0)),
    el("I", 53, 126.90447, Some(4940.0)),
    el("Xe", 54, 131.293, Some(3640.0)),
    // --- Period 6 ---
    el("Cs", 55, 132.9054519, Some(1879.0)),
    el("Ba", 56, 137.327, Some(3510.0)),
    el("La", 57, 138.90547, Some(6146.0)),
    el("Ce", 58, 140.116, Some(6689.0)),
    el("Pr", 59, 140.90765, Some(6640.0)),
    el("Nd", 60, 144.242, Some(7010.0)),
    el("Pm", 61, 145.0, Some(7264.0)),
    el("Sm", 62, 150.36, Some(7353.0)),
    el("Eu", 63, 151.964, Some(5244.0)),
    el("Gd", 64, 157.25, Some(7901.0)),
    el("Tb", 65, 158.92535, Some(8219.0)),
    el("Dy", 66, 162.500, Some(8551.0)),
    el("Ho", 67, 164.93032, Some(8795.0)),
    el("Er", 68, 167.259, Some(9066.0)),
    el("Tm", 69, 168.93421, Some(9321.0)),
    el("Yb", 70, 173.054, Some(6570.0)),
    el("Lu", 71, 174.9668, Some(9841.0)),
    el("Hf", 72, 178.49, Some(13310.0)),
    el("Ta", 73, 180.94788, Some(16650.0)),
    el("W", 74, 183.84, Some(19250.0)),
    el("Re", 75, 186.207, Some(21020.0)),
    el("Os", 76, 190.23, Some(22610.0)),
    el("Ir", 77, 192.217, Some(22650.0)),
    el("Pt", 78, 195.084, Some(21090.0)),
    el("Au", 79, 196.966569, Some(19300.0)),
    el("Hg", 80, 200.59, Some(14190.0)),
    el("Tl", 81, 204.3833, Some(11850.0)),
    el("Pb", 82, 207.2, Some(11340.0)),
    el("Bi", 83, 208.98040, Some(9780.0)),
    el("Po", 84, 209.0, Some(9196.0)),
    el("At", 85, 210.0, None),
    el("Rn", 86, 222.0, Some(4400.0)),
    // --- Period 7 ---
    el("Fr", 87, 223.0, None),
    el("Ra", 88, 226.0, Some(5000.0)),
    el("Ac", 89, 227.0, Some(10070.0)),
    el("Th", 90, 232.03806, Some(11724.0)),
    el("Pa", 91, 231.03588, Some(15370.0)),
    el("U", 92, 238.02891, Some(19050.0)),
    el("Np", 93, 237.0, Some(20450.0)),
    el("Pu", 94, 244.0, Some(19816.0)),
];

static ELEMENTS_BY_SYMBOL: LazyLock<HashMap<&'static str, &'static Element>> =
    LazyLock::new(|| PERIODIC_TABLE.iter().map(|e| (e.symbol, e)).collect());

/// 按元素符号查找（区分大小写，例如 "Fe"）
pub fn lookup(symbol: &str) -> Result<&'static Element> {
    ELEMENTS_BY_SYMBOL
        .get(symbol)
        .copied()
        .ok_or_else(|| SqsError::UnknownElement(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_table_is_ordered() {
        for (i, element) in PERIODIC_TABLE.iter().enumerate() {
            assert_eq!(element.atomic_number as usize, i + 1, "{}", element.symbol);
        }
    }

    #[test]
    fn test_lookup_density() {
        let fe = lookup("Fe").unwrap();
        assert_eq!(fe.atomic_number, 26);
        assert!((fe.density_g_cm3().unwrap() - 7.874).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_unknown_element() {
        assert!(matches!(lookup("Xx"), Err(SqsError::UnknownElement(_))));
        // 大小写敏感
        assert!(lookup("fe").is_err());
    }

    #[test]
    fn test_missing_density() {
        let at = lookup("At").unwrap();
        assert!(matches!(
            at.density_g_cm3(),
            Err(SqsError::MissingProperty { .. })
        ));
    }
}
