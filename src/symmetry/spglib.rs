//! # spglib 空间群桥接
//!
//! spglib 是 C 库，这里不做 FFI，而是调用带 spglib 的 python 解释器，
//! 通过 stdin/stdout 交换 JSON。
//!
//! ## 协议
//! ```text
//! stdin : {"lattice": [[..]], "positions": [[..]], "numbers": [..],
//!          "symprec": 0.01, "angle_tolerance": 5.0}
//! stdout: {"symbol": "Pm-3m", "number": 221} 或 {"error": "..."}
//! ```
//!
//! ## 依赖关系
//! - 实现 `symmetry::SymmetryAnalyzer`
//! - 使用 `elements.rs` 获取原子序数

use super::{SpaceGroupInfo, SymmetryAnalyzer, SymmetryTolerances};
use crate::elements;
use crate::error::{Result, SqsError};
use crate::models::{CrystalStructure, Species};

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

const PY_CALL_SPGLIB: &str = r#"
import json
import sys

try:
    import spglib
except ImportError as exc:
    print(json.dumps({"error": "spglib is not available: %s" % exc}))
    sys.exit(0)

data = json.load(sys.stdin)
cell = (data["lattice"], data["positions"], data["numbers"])
result = spglib.get_spacegroup(
    cell, symprec=data["symprec"], angle_tolerance=data["angle_tolerance"]
)
if result is None:
    print(json.dumps({"error": str(spglib.get_error_message())}))
else:
    symbol, number = result.split()
    print(json.dumps({"symbol": symbol, "number": int(number.strip("()"))}))
"#;

#[derive(Debug, Serialize)]
struct SpglibRequest {
    lattice: [[f64; 3]; 3],
    positions: Vec<[f64; 3]>,
    numbers: Vec<u32>,
    symprec: f64,
    angle_tolerance: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpglibResponse {
    Found { symbol: String, number: u32 },
    Failed { error: String },
}

/// 调用 python spglib 的空间群分析器
#[derive(Debug, Clone)]
pub struct SpglibScript {
    /// python 解释器
    python: String,
}

impl SpglibScript {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl Default for SpglibScript {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl SymmetryAnalyzer for SpglibScript {
    fn space_group(
        &self,
        structure: &CrystalStructure,
        tolerances: SymmetryTolerances,
    ) -> Result<SpaceGroupInfo> {
        let request = build_request(structure, tolerances)?;
        let payload = serde_json::to_vec(&request)?;

        debug!(
            python = %self.python,
            num_sites = structure.num_sites(),
            symprec = tolerances.symprec,
            "Calling spglib"
        );

        let mut child = Command::new(&self.python)
            .args(["-c", PY_CALL_SPGLIB])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| SqsError::CommandNotFound {
                command: self.python.clone(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .map_err(|e| SqsError::CommandFailed {
                    command: self.python.clone(),
                    stderr: e.to_string(),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SqsError::CommandFailed {
                command: self.python.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SqsError::CommandFailed {
                command: format!("{} -c <spglib>", self.python),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

/// 构建 spglib 输入；只接受真实元素
fn build_request(
    structure: &CrystalStructure,
    tolerances: SymmetryTolerances,
) -> Result<SpglibRequest> {
    let numbers = structure
        .sites
        .iter()
        .map(|site| match &site.species {
            Species::Element { symbol } => Ok(elements::lookup(symbol)?.atomic_number),
            other => Err(SqsError::Symmetry(format!(
                "Placeholder species '{}' cannot be analyzed; substitute real elements first",
                other
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SpglibRequest {
        lattice: structure.lattice.matrix,
        positions: structure.sites.iter().map(|s| s.frac_coords).collect(),
        numbers,
        symprec: tolerances.symprec,
        angle_tolerance: tolerances.angle_tolerance,
    })
}

/// 解析脚本输出（取最后一个非空行，忽略 python 的其他打印）
fn parse_response(stdout: &str) -> Result<SpaceGroupInfo> {
    let line = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .ok_or_else(|| SqsError::Symmetry("spglib produced no output".to_string()))?;

    let response: SpglibResponse = serde_json::from_str(line)
        .map_err(|e| SqsError::Symmetry(format!("Unexpected spglib output '{}': {}", line, e)))?;

    match response {
        SpglibResponse::Found { symbol, number } => Ok(SpaceGroupInfo { symbol, number }),
        SpglibResponse::Failed { error } => Err(SqsError::Symmetry(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lattice, Site};

    fn cscl() -> CrystalStructure {
        CrystalStructure::new(
            Lattice::cubic(3.0),
            vec![
                Site::new(Species::element("Cs"), [0.0, 0.0, 0.0]),
                Site::new(Species::element("Cl"), [0.5, 0.5, 0.5]),
            ],
        )
    }

    #[test]
    fn test_build_request() {
        let request = build_request(&cscl(), SymmetryTolerances::default()).unwrap();
        assert_eq!(request.numbers, vec![55, 17]);
        assert_eq!(request.positions[1], [0.5, 0.5, 0.5]);
        assert_eq!(request.symprec, 1e-2);
        assert_eq!(request.angle_tolerance, 5.0);
    }

    #[test]
    fn test_build_request_rejects_placeholders() {
        let structure = CrystalStructure::new(
            Lattice::cubic(3.0),
            vec![Site::new(Species::placeholder("a", "a"), [0.0, 0.0, 0.0])],
        );
        assert!(matches!(
            build_request(&structure, SymmetryTolerances::default()),
            Err(SqsError::Symmetry(_))
        ));
    }

    #[test]
    fn test_parse_response() {
        let info = parse_response("some warning\n{\"symbol\": \"Pm-3m\", \"number\": 221}\n").unwrap();
        assert_eq!(
            info,
            SpaceGroupInfo {
                symbol: "Pm-3m".to_string(),
                number: 221
            }
        );

        let err = parse_response("{\"error\": \"too close\"}").unwrap_err();
        assert!(err.to_string().contains("too close"));

        assert!(parse_response("").is_err());
        assert!(parse_response("not json").is_err());
    }

    #[test]
    fn test_missing_interpreter() {
        let analyzer = SpglibScript::new("definitely-not-a-python-interpreter");
        let result = analyzer.space_group(&cscl(), SymmetryTolerances::default());
        assert!(matches!(result, Err(SqsError::CommandNotFound { .. })));
    }
}
