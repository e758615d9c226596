//! # query 命令实现
//!
//! 在 SQS 数据库目录中查找可代入给定亚晶格模型的记录。
//!
//! ## 依赖关系
//! - 使用 `cli/query.rs` 定义的参数
//! - 使用 `database/`

use crate::cli::query::QueryArgs;
use crate::database::{structures_from_database, DatabaseMatch, SqsDatabase};
use crate::error::Result;
use crate::utils::model::format_sublattice_model;
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct MatchRow {
    #[tabled(rename = "Record")]
    source: String,
    #[tabled(rename = "Symmetry")]
    symmetry: String,
    #[tabled(rename = "Abstract model")]
    abstract_model: String,
    #[tabled(rename = "Site ratios")]
    site_ratios: String,
    #[tabled(rename = "Grouping")]
    grouping: String,
    #[tabled(rename = "Solution model")]
    solution_model: String,
}

impl From<&DatabaseMatch<'_>> for MatchRow {
    fn from(m: &DatabaseMatch<'_>) -> Self {
        let record = &m.entry.record;
        MatchRow {
            source: m
                .entry
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            symmetry: record.symmetry.to_string(),
            abstract_model: format_sublattice_model(&record.sublattice_model),
            site_ratios: format!("{:?}", record.sublattice_site_ratios),
            grouping: format!("{:?}", m.grouping),
            solution_model: format_sublattice_model(&m.solution_sublattice_model),
        }
    }
}

/// 执行 query 命令
pub fn execute(args: QueryArgs) -> Result<()> {
    output::print_header(&format!(
        "Querying '{}' for {} {:?}",
        args.db.display(),
        format_sublattice_model(&args.model.0),
        args.ratios
    ));

    let spinner = progress::create_spinner("Loading records");
    let loaded = SqsDatabase::load(&args.db);
    spinner.finish_and_clear();
    let db = loaded?;
    output::print_info(&format!("Loaded {} record(s)", db.len()));

    let matches =
        structures_from_database(&db, &args.model.0, &args.ratios, args.symmetry.as_deref())?;
    if matches.is_empty() {
        output::print_warning("No compatible SQS found");
        return Ok(());
    }

    let rows: Vec<MatchRow> = matches.iter().map(MatchRow::from).collect();
    println!("{}", Table::new(&rows));

    output::print_done(&format!("{} compatible SQS found", matches.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::l12_record;

    #[test]
    fn test_match_row() {
        let mut db = SqsDatabase::new();
        db.insert(l12_record());
        let model = vec![
            vec!["Al".to_string()],
            vec!["Al".to_string(), "Ni".to_string()],
        ];
        let matches = structures_from_database(&db, &model, &[3.0, 1.0], None).unwrap();

        let row = MatchRow::from(&matches[0]);
        assert_eq!(row.source, "-");
        assert_eq!(row.symmetry, "Pm-3m (221)");
        assert_eq!(row.site_ratios, "[[1, 1], [6]]");
        assert_eq!(row.grouping, "[1, 0]");
        assert_eq!(row.solution_model, "Al,Ni;Al");
    }
}
