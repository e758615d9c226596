//! # ATAT lat.in 格式解析器
//!
//! 解析 ATAT (mcsqs) 输出的 lat.in / bestsqs.out 文本，只做语法层面的解析，
//! 物种命名和亚晶格推断交给 `sqs/builder.rs`。
//!
//! ## lat.in 格式说明
//! ```text
//! 1.0 0.0 0.0          # 坐标系：三行向量
//! 0.0 1.0 0.0          #   或者一行 a b c alpha beta gamma
//! 0.0 0.0 1.0
//! -1.0 1.0 -1.0        # 晶格向量 (以坐标系为单位)
//! 1.0 -1.0 -1.0
//! -2.0 -2.0 0.0
//! -1.0 -2.0 -1.0 a_A   # 原子：位置 + 一个或多个物种标签
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `sqs/builder.rs` 使用
//! - 使用 `regex` 做分词

use crate::error::{Result, SqsError};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<float>[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)|(?P<word>[A-Za-z_]+)|(?P<sep>,)")
        .expect("token regex is valid")
});

/// 坐标系
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSystem {
    /// 三个坐标轴向量
    Vectors([[f64; 3]; 3]),
    /// 轴长 + 夹角 (度)
    Parameters { lengths: [f64; 3], angles: [f64; 3] },
}

/// 一个原子条目
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAtom {
    /// 以坐标系为单位的位置
    pub position: [f64; 3],
    /// 原始物种标签，例如 `["a_B"]`
    pub species: Vec<String>,
}

/// lat.in 的语法解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLattice {
    pub coordinate_system: CoordinateSystem,
    /// 晶格向量，以坐标系为单位
    pub lattice: [[f64; 3]; 3],
    pub atoms: Vec<ParsedAtom>,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Float(f64),
    Word(String),
    Separator,
}

/// 带行号的词法单元
#[derive(Debug, Clone)]
struct Lexeme {
    token: Token,
    line: usize,
}

fn parse_error(line: usize, reason: impl Into<String>) -> SqsError {
    SqsError::ParseError {
        format: "lat.in".to_string(),
        path: format!("line {}", line),
        reason: reason.into(),
    }
}

fn tokenize(content: &str) -> Result<Vec<Lexeme>> {
    let mut lexemes = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let mut last_end = 0;

        for caps in TOKEN_RE.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let gap = &line[last_end..whole.start()];
            if !gap.trim().is_empty() {
                return Err(parse_error(line_no, format!("Unexpected text '{}'", gap.trim())));
            }
            last_end = whole.end();

            let token = if let Some(m) = caps.name("float") {
                let value = m
                    .as_str()
                    .parse()
                    .map_err(|_| parse_error(line_no, format!("Invalid number '{}'", m.as_str())))?;
                Token::Float(value)
            } else if let Some(m) = caps.name("word") {
                Token::Word(m.as_str().to_string())
            } else {
                Token::Separator
            };
            lexemes.push(Lexeme {
                token,
                line: line_no,
            });
        }

        let rest = &line[last_end..];
        if !rest.trim().is_empty() {
            return Err(parse_error(line_no, format!("Unexpected text '{}'", rest.trim())));
        }
    }

    Ok(lexemes)
}

/// 递归下降解析器的游标
struct Cursor {
    lexemes: Vec<Lexeme>,
    pos: usize,
}

impl Cursor {
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.lexemes.last())
            .map(|l| l.line)
            .unwrap_or(0)
    }

    fn float(&mut self, what: &str) -> Result<(f64, usize)> {
        match self.peek() {
            Some(Lexeme {
                token: Token::Float(v),
                line,
            }) => {
                let out = (*v, *line);
                self.pos += 1;
                Ok(out)
            }
            Some(other) => Err(parse_error(
                other.line,
                format!("Expected a number in {}, found {:?}", what, other.token),
            )),
            None => Err(parse_error(
                self.current_line(),
                format!("Unexpected end of input while reading {}", what),
            )),
        }
    }

    fn vector(&mut self, what: &str) -> Result<([f64; 3], usize)> {
        let (x, line) = self.float(what)?;
        let (y, _) = self.float(what)?;
        let (z, last) = self.float(what)?;
        Ok(([x, y, z], last.max(line)))
    }

    /// 下一个词法单元是否与 `line` 同一行
    fn continues_line(&self, line: usize) -> bool {
        self.peek().is_some_and(|l| l.line == line)
    }

    /// 向量必须独占一行
    fn vector_line(&mut self, what: &str) -> Result<[f64; 3]> {
        let (v, line) = self.vector(what)?;
        if self.continues_line(line) {
            return Err(parse_error(
                line,
                format!("Expected end of line after {}", what),
            ));
        }
        Ok(v)
    }

    fn coordinate_system(&mut self) -> Result<CoordinateSystem> {
        let (first, line) = self.vector("coordinate system")?;

        if self.continues_line(line) {
            let (angles, angle_line) = self.vector("coordinate system angles")?;
            if self.continues_line(angle_line) {
                return Err(parse_error(
                    angle_line,
                    "Expected end of line after coordinate system angles",
                ));
            }
            return Ok(CoordinateSystem::Parameters {
                lengths: first,
                angles,
            });
        }

        let second = self.vector_line("coordinate system")?;
        let third = self.vector_line("coordinate system")?;
        Ok(CoordinateSystem::Vectors([first, second, third]))
    }

    fn atom(&mut self) -> Result<ParsedAtom> {
        let (position, _) = self.vector("atom position")?;

        let mut species = Vec::new();
        loop {
            match self.peek().map(|l| &l.token) {
                Some(Token::Word(w)) => {
                    species.push(w.clone());
                    self.pos += 1;
                }
                Some(Token::Separator) if !species.is_empty() => {
                    self.pos += 1;
                }
                _ => break,
            }
        }

        if species.is_empty() {
            return Err(parse_error(
                self.current_line(),
                "Expected a species label after the atom position",
            ));
        }

        Ok(ParsedAtom { position, species })
    }
}

/// 解析 lat.in 文本
pub fn parse_lat_in(content: &str) -> Result<ParsedLattice> {
    let mut cursor = Cursor {
        lexemes: tokenize(content)?,
        pos: 0,
    };

    let coordinate_system = cursor.coordinate_system()?;

    let (a, _) = cursor.vector("lattice")?;
    let (b, _) = cursor.vector("lattice")?;
    let (c, _) = cursor.vector("lattice")?;

    let mut atoms = vec![cursor.atom()?];
    while cursor.peek().is_some() {
        atoms.push(cursor.atom()?);
    }

    Ok(ParsedLattice {
        coordinate_system,
        lattice: [a, b, c],
        atoms,
    })
}

/// 解析 lat.in 文件
pub fn parse_lat_in_file(path: &Path) -> Result<ParsedLattice> {
    let content = fs::read_to_string(path).map_err(|e| SqsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_lat_in(&content).map_err(|e| match e {
        SqsError::ParseError { format, path: at, reason } => SqsError::ParseError {
            format,
            path: path.display().to_string(),
            reason: format!("{}: {}", at, reason),
        },
        other => other,
    })
}
