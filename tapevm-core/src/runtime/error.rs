//! 运行时错误类型

use std::io;

use thiserror::Error;

/// 输入输出流错误
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    /// 输入耗尽时还在读
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

impl StreamError {
    pub(crate) fn from_read(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            StreamError::UnexpectedEof
        } else {
            StreamError::Read(error)
        }
    }
}

/// 统一的运行时错误类型
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// 读写失败，执行立即终止
    #[error("at instruction {instruction}: {source}")]
    Stream {
        instruction: usize,
        #[source]
        source: StreamError,
    },
    /// 数据指针越界（仅 `BoundsPolicy::Error`）
    #[error("at instruction {instruction}: data pointer moved to {target}, outside the tape of {len} cells")]
    OutOfBounds {
        instruction: usize,
        target: isize,
        len: usize,
    },
    /// 超出执行步数上限
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
    /// 之前的读写失败已经终止了执行
    #[error("execution was aborted by a stream error at instruction {instruction}")]
    Aborted { instruction: usize },
}

impl RuntimeError {
    /// 出错的指令下标（如果有）
    pub fn instruction(&self) -> Option<usize> {
        match self {
            RuntimeError::Stream { instruction, .. }
            | RuntimeError::OutOfBounds { instruction, .. }
            | RuntimeError::Aborted { instruction } => Some(*instruction),
            RuntimeError::StepLimitExceeded { .. } => None,
        }
    }
}
