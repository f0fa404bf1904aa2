//! 编译产物

use std::fmt::Write;
use std::ops::Deref;

use super::instruction::Instruction;

/// 编译完成、跳转已回填的指令序列
///
/// 只能由编译器构造，构造后不可变；可以在多个机器之间只读共享。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub(crate) fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// 可读的反汇编清单，每行一条指令
    pub fn disassemble(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {name} ==");
        let width = self.instructions.len().max(1).to_string().len();
        for (index, instruction) in self.instructions.iter().enumerate() {
            let _ = writeln!(out, "{index:0width$} {instruction}");
        }
        out
    }
}

impl Deref for Program {
    type Target = [Instruction];

    fn deref(&self) -> &Self::Target {
        &self.instructions
    }
}
