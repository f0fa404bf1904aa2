//! API 类型定义
//!
//! 编译和执行的输入输出类型。

use tapevm_core::{ArgumentError, Cell, Halt, Program};

/// 编译输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    /// 指令序列
    pub program: Program,
    /// 非致命诊断（自定义指令参数错误）
    pub diagnostics: Vec<ArgumentError>,
}

/// 执行输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// 停机原因
    pub halt: Halt,
    /// 执行的指令条数
    pub steps: u64,
    /// 停机时的数据指针
    pub data_pointer: usize,
    /// 停机时的纸带
    pub memory: Vec<Cell>,
}
