//! 自定义指令分发
//!
//! 机器只负责把 `{name}arg` 连同纸带视图交给调用方提供的分发器，
//! 指令具体做什么由调用方决定。

use super::machine::Cell;

/// 分发器看到的机器状态
///
/// 可以读写任意格子，但不能移动数据指针，也碰不到指令指针和程序。
#[derive(Debug)]
pub struct MachineView<'m> {
    memory: &'m mut [Cell],
    data_pointer: usize,
}

impl<'m> MachineView<'m> {
    pub(crate) fn new(memory: &'m mut [Cell], data_pointer: usize) -> Self {
        Self {
            memory,
            data_pointer,
        }
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    /// 当前格的值
    pub fn current(&self) -> Cell {
        self.memory[self.data_pointer]
    }

    pub fn current_mut(&mut self) -> &mut Cell {
        &mut self.memory[self.data_pointer]
    }

    pub fn set_current(&mut self, value: Cell) {
        self.memory[self.data_pointer] = value;
    }

    /// 整条纸带
    pub fn memory(&self) -> &[Cell] {
        &*self.memory
    }

    pub fn memory_mut(&mut self) -> &mut [Cell] {
        &mut *self.memory
    }
}

/// 自定义指令分发能力
pub trait CustomDispatch {
    /// `name` 带花括号，`arg` 缺省为 0
    fn dispatch(&mut self, name: &str, arg: i64, machine: &mut MachineView<'_>);
}

impl<F> CustomDispatch for F
where
    F: FnMut(&str, i64, &mut MachineView<'_>),
{
    fn dispatch(&mut self, name: &str, arg: i64, machine: &mut MachineView<'_>) {
        self(name, arg, machine)
    }
}

/// 未注册分发器时使用：自定义指令什么也不做
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDispatch;

impl CustomDispatch for NoDispatch {
    fn dispatch(&mut self, _name: &str, _arg: i64, _machine: &mut MachineView<'_>) {}
}
