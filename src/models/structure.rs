//! # 晶体结构数据模型
//!
//! 定义通用的晶体结构表示：晶格 + 有序的格点列表。
//! 亚晶格相关的语义不在这里，由 `models/sqs.rs` 以组合方式附加。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`sqs/`、`symmetry/` 使用
//! - 使用 `elements.rs` 计算质量和密度

use crate::elements::{self, AMU_G_PER_CM3};
use crate::error::{Result, SqsError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 晶格参数表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格参数 (a, b, c, alpha, beta, gamma) 创建晶格
    /// 角度单位：度
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let a_vec = [a, 0.0, 0.0];
        let b_vec = [b * cos_gamma, b * sin_gamma, 0.0];

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();

        Lattice {
            matrix: [a_vec, b_vec, [c1, c2, c3]],
        }
    }

    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 立方晶格
    pub fn cubic(a: f64) -> Self {
        Lattice::from_vectors([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix;

        let a = norm(&a_vec);
        let b = norm(&b_vec);
        let c = norm(&c_vec);

        let alpha = (dot(&b_vec, &c_vec) / (b * c)).acos().to_degrees();
        let beta = (dot(&a_vec, &c_vec) / (a * c)).acos().to_degrees();
        let gamma = (dot(&a_vec, &b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 计算晶格体积（有符号，行列式）
    pub fn determinant(&self) -> f64 {
        let [a, b, c] = self.matrix;
        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    }

    /// 计算晶格体积 (Å³)
    pub fn volume(&self) -> f64 {
        self.determinant().abs()
    }

    /// 把以 `basis` 为单位表示的晶格变换到笛卡尔坐标：行向量约定下为 self · basis
    pub fn in_basis(&self, basis: &Lattice) -> Lattice {
        let mut matrix = [[0.0; 3]; 3];
        for (i, row) in matrix.iter_mut().enumerate() {
            *row = row_times(&self.matrix[i], &basis.matrix);
        }
        Lattice { matrix }
    }

    /// 等比例缩放到给定体积，晶格角度不变
    pub fn scaled_to_volume(&self, volume: f64) -> Lattice {
        let factor = (volume / self.volume()).cbrt();
        let mut matrix = self.matrix;
        for row in matrix.iter_mut() {
            for x in row.iter_mut() {
                *x *= factor;
            }
        }
        Lattice { matrix }
    }

    /// 笛卡尔坐标转分数坐标
    pub fn cart_to_frac(&self, cart: [f64; 3]) -> Result<[f64; 3]> {
        let m = self.matrix;
        let det = self.determinant();

        if det.abs() < 1e-10 {
            return Err(SqsError::InvalidFormat(format!(
                "Singular lattice matrix {:?}",
                m
            )));
        }

        let inv = [
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) / det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) / det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) / det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
            ],
        ];

        // 行向量: frac = cart · M⁻¹
        Ok(row_times(&cart, &inv))
    }

    /// 分数坐标转笛卡尔坐标
    pub fn frac_to_cart(&self, frac: [f64; 3]) -> [f64; 3] {
        row_times(&frac, &self.matrix)
    }
}

fn dot(u: &[f64; 3], v: &[f64; 3]) -> f64 {
    u.iter().zip(v.iter()).map(|(x, y)| x * y).sum()
}

fn norm(u: &[f64; 3]) -> f64 {
    dot(u, u).sqrt()
}

fn row_times(v: &[f64; 3], m: &[[f64; 3]; 3]) -> [f64; 3] {
    [
        v[0] * m[0][0] + v[1] * m[1][0] + v[2] * m[2][0],
        v[0] * m[0][1] + v[1] * m[1][1] + v[2] * m[2][1],
        v[0] * m[0][2] + v[1] * m[1][2] + v[2] * m[2][2],
    ]
}

/// 格点上的物种：真实元素，或以 (亚晶格名, 抽象符号) 标记的占位物种
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Species {
    Element { symbol: String },
    Placeholder { sublattice: String, symbol: String },
}

impl Species {
    pub fn element(symbol: impl Into<String>) -> Self {
        Species::Element {
            symbol: symbol.into(),
        }
    }

    pub fn placeholder(sublattice: impl Into<String>, symbol: impl Into<String>) -> Self {
        Species::Placeholder {
            sublattice: sublattice.into(),
            symbol: symbol.into(),
        }
    }

    /// 是否为占位物种
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Species::Placeholder { .. })
    }

    /// 旧式字符串标记：元素为其符号，占位物种为 `X<sublattice><symbol>`
    pub fn token(&self) -> String {
        match self {
            Species::Element { symbol } => symbol.clone(),
            Species::Placeholder { sublattice, symbol } => format!("X{}{}", sublattice, symbol),
        }
    }

    /// 解析旧式字符串标记
    ///
    /// 亚晶格名可能是多字符的，必须显式给出已知的亚晶格名；
    /// 多个名字都是前缀时取最长的那个。不以 `X` 开头的标记视为元素。
    pub fn from_token<S: AsRef<str>>(token: &str, sublattice_names: &[S]) -> Result<Self> {
        let Some(rest) = token.strip_prefix('X') else {
            return Ok(Species::element(token));
        };

        sublattice_names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !name.is_empty() && rest.len() > name.len() && rest.starts_with(name))
            .max_by_key(|name| name.len())
            .map(|name| Species::placeholder(name, &rest[name.len()..]))
            .ok_or_else(|| {
                SqsError::InvalidFormat(format!(
                    "Cannot split placeholder token '{}' with sublattice names {:?}",
                    token,
                    sublattice_names
                        .iter()
                        .map(|n| n.as_ref())
                        .collect::<Vec<_>>()
                ))
            })
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// 格点：一个物种 + 分数坐标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub species: Species,

    /// 分数坐标 [x, y, z]
    pub frac_coords: [f64; 3],
}

impl Site {
    pub fn new(species: Species, frac_coords: [f64; 3]) -> Self {
        Site {
            species,
            frac_coords,
        }
    }
}

/// 晶体结构：共享一个晶格的有序格点序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalStructure {
    /// 晶格
    pub lattice: Lattice,

    /// 格点列表
    pub sites: Vec<Site>,
}

impl CrystalStructure {
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Self {
        CrystalStructure { lattice, sites }
    }

    /// 由笛卡尔坐标构建
    pub fn from_cartesian(
        lattice: Lattice,
        species: Vec<Species>,
        positions: &[[f64; 3]],
    ) -> Result<Self> {
        if species.len() != positions.len() {
            return Err(SqsError::InvalidFormat(format!(
                "{} species given for {} positions",
                species.len(),
                positions.len()
            )));
        }

        let sites = species
            .into_iter()
            .zip(positions.iter())
            .map(|(sp, &cart)| Ok(Site::new(sp, lattice.cart_to_frac(cart)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(CrystalStructure { lattice, sites })
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// 晶格体积 (Å³)
    pub fn volume(&self) -> f64 {
        self.lattice.volume()
    }

    /// 所有格点的笛卡尔坐标
    pub fn cart_coords(&self) -> Vec<[f64; 3]> {
        self.sites
            .iter()
            .map(|s| self.lattice.frac_to_cart(s.frac_coords))
            .collect()
    }

    /// 替换晶格，分数坐标保持不变
    pub fn with_lattice(&self, lattice: Lattice) -> Self {
        CrystalStructure {
            lattice,
            sites: self.sites.clone(),
        }
    }

    /// 等比例缩放到给定体积
    pub fn scaled_to_volume(&self, volume: f64) -> Self {
        self.with_lattice(self.lattice.scaled_to_volume(volume))
    }

    /// 逐格点替换物种，坐标和晶格不变
    pub fn map_species<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Species) -> Species,
    {
        CrystalStructure {
            lattice: self.lattice.clone(),
            sites: self
                .sites
                .iter()
                .map(|s| Site::new(f(&s.species), s.frac_coords))
                .collect(),
        }
    }

    /// 每种物种的格点数
    pub fn composition(&self) -> BTreeMap<Species, usize> {
        let mut counts = BTreeMap::new();
        for site in &self.sites {
            *counts.entry(site.species.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// 各元素的摩尔分数；占位物种会报错
    pub fn fractional_composition(&self) -> Result<BTreeMap<String, f64>> {
        let total = self.num_sites() as f64;
        self.composition()
            .into_iter()
            .map(|(species, count)| match species {
                Species::Element { symbol } => Ok((symbol, count as f64 / total)),
                other => Err(SqsError::UnknownElement(other.token())),
            })
            .collect()
    }

    /// 总质量 (amu)
    pub fn total_mass(&self) -> Result<f64> {
        self.composition()
            .into_iter()
            .map(|(species, count)| match species {
                Species::Element { symbol } => {
                    Ok(elements::lookup(&symbol)?.atomic_mass * count as f64)
                }
                other => Err(SqsError::UnknownElement(other.token())),
            })
            .sum()
    }

    /// 密度 (g/cm³)
    pub fn density(&self) -> Result<f64> {
        Ok(self.total_mass()? * AMU_G_PER_CM3 / self.volume())
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        self.composition()
            .into_iter()
            .map(|(species, count)| {
                if count == 1 {
                    species.token()
                } else {
                    format!("{}{}", species.token(), count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
