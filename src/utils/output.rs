//! # 终端输出
//!
//! 命令的人类可读输出：带颜色标签的消息、标题栏和键值摘要。
//! 警告和错误走 stderr，和 `tracing` 日志在一起；其余走 stdout，方便重定向。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

const RULE_WIDTH: usize = 60;

fn tagged(tag: ColoredString, msg: &str) -> String {
    format!("{} {}", tag, msg)
}

pub fn print_success(msg: &str) {
    println!("{}", tagged("[OK]".green().bold(), msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("[ERR]".red().bold(), msg));
}

pub fn print_warning(msg: &str) {
    eprintln!("{}", tagged("[WARN]".yellow().bold(), msg));
}

pub fn print_info(msg: &str) {
    println!("{}", tagged("[*]".blue().bold(), msg));
}

pub fn print_done(msg: &str) {
    println!("{}", tagged("[DONE]".green().bold(), msg));
}

/// `输入 -> 输出`
pub fn print_conversion(from: &str, to: &str) {
    let arrow = format!("{} {} {}", from.dimmed(), "->".cyan(), to);
    println!("{}", tagged("[OK]".green().bold(), &arrow));
}

/// 对齐的键值行，例如 `  Volume:        445.3521 Å³`
pub fn print_field(key: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{:<15}", format!("{}:", key)).bold(), value);
}

pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("\n{}\n  {}\n{}\n", rule.dimmed(), title.bold(), rule.dimmed());
}
