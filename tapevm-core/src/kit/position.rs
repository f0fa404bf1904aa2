//! 源代码位置追踪
//!
//! - line/column: 人类可读的错误显示（1-based）
//! - byte_offset: 源码切片定位（0-based）

use std::fmt;

/// 源代码位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePosition {
    /// 行号，1-based
    pub line: usize,
    /// 列号，1-based，Unicode码点计数
    pub column: usize,
    /// 字节偏移，0-based
    pub byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// 文件起始位置
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            byte_offset: 0,
        }
    }

    /// 前进一个字符
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.byte_offset += c.len_utf8();
    }

    /// 计算 `byte_offset` 在 `source` 中的行列
    ///
    /// 超出源码长度时停在末尾。
    pub fn locate(source: &str, byte_offset: usize) -> Self {
        let mut pos = Self::start();
        for c in source.chars() {
            if pos.byte_offset >= byte_offset {
                break;
            }
            pos.advance(c);
        }
        pos
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
