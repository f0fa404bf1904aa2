//! 编译错误类型

use std::num::ParseIntError;

use thiserror::Error;

use crate::kit::SourcePosition;

/// 括号不匹配，编译直接失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// `]` 前面没有可配对的 `[`
    #[error("[{position}] `]` found without corresponding `[`")]
    UnmatchedClose { position: SourcePosition },
    /// `[` 到文件末尾都没有闭合
    #[error("[{position}] `[` found without corresponding `]`")]
    UnmatchedOpen { position: SourcePosition },
}

impl SyntaxError {
    pub fn position(&self) -> SourcePosition {
        match self {
            SyntaxError::UnmatchedClose { position } | SyntaxError::UnmatchedOpen { position } => {
                *position
            }
        }
    }

    /// 获取行号（1-based）
    pub fn line(&self) -> usize {
        self.position().line
    }

    /// 获取列号（1-based）
    pub fn column(&self) -> usize {
        self.position().column
    }
}

/// 自定义指令的数字参数无法解析（不致命，参数按 0 处理）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{position}] argument `{literal}` of {name} is not a valid integer: {source}")]
pub struct ArgumentError {
    /// 指令名（带花括号）
    pub name: String,
    /// 原始数字文本
    pub literal: String,
    /// 指令起始位置
    pub position: SourcePosition,
    #[source]
    pub source: ParseIntError,
}
