//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub use tapevm_core::{ArgumentError, RuntimeError, StreamError, SyntaxError};

/// Tapevm 错误类型
#[derive(Error, Debug)]
pub enum TapeError {
    /// 括号不匹配
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// 运行时错误
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl TapeError {
    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            TapeError::Syntax(e) => Some(e.line()),
            TapeError::Runtime(_) => None,
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            TapeError::Syntax(e) => Some(e.column()),
            TapeError::Runtime(_) => None,
        }
    }

    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            TapeError::Syntax(_) => "validator",
            TapeError::Runtime(_) => "vm",
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    pub fn to_report(&self) -> ErrorReport {
        match self {
            TapeError::Syntax(e) => ErrorReport {
                phase: self.phase(),
                line: Some(e.line()),
                column: Some(e.column()),
                instruction: None,
                error_kind: match e {
                    SyntaxError::UnmatchedClose { .. } => "UnmatchedClose",
                    SyntaxError::UnmatchedOpen { .. } => "UnmatchedOpen",
                },
                message: e.to_string(),
            },
            TapeError::Runtime(e) => ErrorReport {
                phase: self.phase(),
                line: None,
                column: None,
                instruction: e.instruction(),
                error_kind: match e {
                    RuntimeError::Stream {
                        source: StreamError::UnexpectedEof,
                        ..
                    } => "UnexpectedEof",
                    RuntimeError::Stream {
                        source: StreamError::Read(_),
                        ..
                    } => "ReadFailed",
                    RuntimeError::Stream {
                        source: StreamError::Write(_),
                        ..
                    } => "WriteFailed",
                    RuntimeError::OutOfBounds { .. } => "OutOfBounds",
                    RuntimeError::StepLimitExceeded { .. } => "StepLimitExceeded",
                    RuntimeError::Aborted { .. } => "Aborted",
                },
                message: e.to_string(),
            },
        }
    }
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段
    pub phase: &'static str,
    /// 行号（1-based）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 列号（1-based）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// 出错的指令下标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<usize>,
    /// 错误类型
    pub error_kind: &'static str,
    /// 错误消息
    pub message: String,
}

impl ErrorReport {
    /// 非致命的编译诊断
    pub fn from_diagnostic(diagnostic: &ArgumentError) -> Self {
        Self {
            phase: "compiler",
            line: Some(diagnostic.position.line),
            column: Some(diagnostic.position.column),
            instruction: None,
            error_kind: "InvalidArgument",
            message: diagnostic.to_string(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.phase, self.error_kind, self.message)
    }
}
