//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use tapevm_api::{ErrorReport, TapeError};

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// 打印错误并显示源代码上下文
pub fn print_error_with_source(e: &TapeError, source: &str) {
    eprintln!("❌ {}", e);

    if let (Some(line), Some(column)) = (e.line(), e.column()) {
        eprint!("{}", render_source_context(source, line, column));
    }
}

/// 打印编译诊断（不致命）
pub fn print_warning_with_source(report: &ErrorReport, source: &str) {
    eprintln!("⚠️  {}", report);

    if let (Some(line), Some(column)) = (report.line, report.column) {
        eprint!("{}", render_source_context(source, line, column));
    }
}

/// 渲染错误行及其前后几行，并用 `^` 标出列
fn render_source_context(source: &str, error_line: usize, error_col: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return String::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);
    let width = end_line.to_string().len();
    let separator = "-".repeat(width + 1);

    let mut out = format!("{}|--\n", separator);
    for line_idx in start_line..=end_line {
        out.push_str(&format!("{:>width$} | {}\n", line_idx, lines[line_idx - 1]));
        if line_idx == error_line {
            let marker = " ".repeat(error_col.saturating_sub(1));
            out.push_str(&format!("{} | {}^\n", " ".repeat(width), marker));
        }
    }
    out.push_str(&format!("{}|--\n", separator));
    out
}
