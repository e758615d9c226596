//! # 亚晶格模型的命令行语法
//!
//! `"Fe,Ni;Al"` <-> `[['Fe', 'Ni'], ['Al']]`：`;` 分隔亚晶格，`,` 分隔元素。
//!
//! ## 依赖关系
//! - 被 `cli/` 的参数解析和 `commands/` 的输出使用

use crate::error::{Result, SqsError};

/// 解析亚晶格模型
pub fn parse_sublattice_model(text: &str) -> Result<Vec<Vec<String>>> {
    text.split(';')
        .map(|subl| {
            let species: Vec<String> = subl
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if species.is_empty() {
                Err(SqsError::InvalidArgument(format!(
                    "Empty sublattice in model '{}'",
                    text
                )))
            } else {
                Ok(species)
            }
        })
        .collect()
}

/// 紧凑显示
pub fn format_sublattice_model(model: &[Vec<String>]) -> String {
    model
        .iter()
        .map(|subl| subl.join(","))
        .collect::<Vec<_>>()
        .join(";")
}

/// 占比的紧凑显示：`[[0.5, 0.5], [1.0]]` -> `0.5,0.5;1`
pub fn format_occupancies(occupancies: &[Vec<f64>]) -> String {
    occupancies
        .iter()
        .map(|subl| {
            subl.iter()
                .map(|x| {
                    let text = format!("{:.4}", x);
                    match text.trim_end_matches('0').trim_end_matches('.') {
                        "" => "0".to_string(),
                        trimmed => trimmed.to_string(),
                    }
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(";")
}
