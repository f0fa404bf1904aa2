//! 纸带虚拟机
//!
//! 单个指令指针顺序执行 `Program`。终止条件：
//! - 指令指针走到序列末尾（正常停机）
//! - 数据指针离开纸带（按 `BoundsPolicy` 停机或报错）
//! - 读写失败或输入耗尽（报错）
//! - 超出步数上限（报错）

use std::io::{Read, Write};

use tracing::{debug, warn};

use super::dispatch::{CustomDispatch, MachineView, NoDispatch};
use super::error::{RuntimeError, StreamError};
use crate::compiler::{Instruction, Program};
use crate::targets;
use tapevm_config::{BoundsPolicy, MachineConfig};

/// 纸带格子：64 位有符号整数，加减按补码回绕
pub type Cell = i64;

/// 停机原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// 指令全部执行完
    Completed,
    /// 数据指针越界后静默停机
    OutOfBounds {
        /// 越界的移动指令下标
        instruction: usize,
        /// 试图移动到的位置
        target: isize,
    },
}

/// 虚拟机
#[derive(Debug)]
pub struct Machine<'p, R, W> {
    program: &'p [Instruction],
    instruction_pointer: usize,
    memory: Vec<Cell>,
    data_pointer: usize,
    input: R,
    output: W,
    bounds: BoundsPolicy,
    max_steps: Option<u64>,
    steps: u64,
    halted: Option<Halt>,
    /// 读写失败时所在的指令；之后不再执行
    aborted: Option<usize>,
}

impl<'p, R, W> Machine<'p, R, W> {
    /// 使用默认配置（30000 格、越界静默停机、不限步数）
    pub fn new(program: &'p Program, input: R, output: W) -> Self {
        Self::with_config(program, input, output, &MachineConfig::default())
    }

    pub fn with_config(program: &'p Program, input: R, output: W, config: &MachineConfig) -> Self {
        Self {
            program: program.instructions(),
            instruction_pointer: 0,
            memory: vec![0; config.memory_size.max(1)],
            data_pointer: 0,
            input,
            output,
            bounds: config.bounds,
            max_steps: config.max_steps,
            steps: 0,
            halted: None,
            aborted: None,
        }
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn memory(&self) -> &[Cell] {
        &self.memory
    }

    /// 当前格的值
    pub fn current(&self) -> Cell {
        self.memory[self.data_pointer]
    }

    /// 已执行的指令条数
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn halted(&self) -> Option<Halt> {
        self.halted
    }

    /// 拆出纸带和输出流
    pub fn into_parts(self) -> (Vec<Cell>, W) {
        (self.memory, self.output)
    }
}

impl<'p, R, W> Machine<'p, R, W>
where
    R: Read,
    W: Write,
{
    /// 运行到停机，自定义指令全部忽略
    pub fn execute(&mut self) -> Result<Halt, RuntimeError> {
        self.execute_with(&mut NoDispatch)
    }

    /// 运行到停机，自定义指令交给 `dispatch`
    pub fn execute_with(&mut self, dispatch: &mut dyn CustomDispatch) -> Result<Halt, RuntimeError> {
        let halt = loop {
            if let Some(halt) = self.step(dispatch)? {
                break halt;
            }
        };

        if let Err(e) = self.output.flush() {
            return Err(self.abort(self.instruction_pointer, StreamError::Write(e)));
        }

        debug!(
            target: targets::VM,
            steps = self.steps,
            data_pointer = self.data_pointer,
            ?halt,
            "execution halted"
        );
        Ok(halt)
    }

    /// 执行一条指令；停机后返回停机原因，之后再调用也只返回同一结果
    pub fn step(&mut self, dispatch: &mut dyn CustomDispatch) -> Result<Option<Halt>, RuntimeError> {
        if let Some(halt) = self.halted {
            return Ok(Some(halt));
        }
        if let Some(instruction) = self.aborted {
            return Err(RuntimeError::Aborted { instruction });
        }

        let program = self.program;
        let ip = self.instruction_pointer;
        let Some(instruction) = program.get(ip) else {
            self.halted = Some(Halt::Completed);
            return Ok(Some(Halt::Completed));
        };

        if let Some(limit) = self.max_steps {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;

        #[cfg(feature = "trace_execution")]
        tracing::trace!(
            target: targets::VM,
            ip,
            dp = self.data_pointer,
            cell = self.memory[self.data_pointer],
            "execute: {instruction}"
        );

        match instruction {
            Instruction::Increment(n) => {
                let cell = &mut self.memory[self.data_pointer];
                *cell = cell.wrapping_add(*n as Cell);
            }
            Instruction::Decrement(n) => {
                let cell = &mut self.memory[self.data_pointer];
                *cell = cell.wrapping_sub(*n as Cell);
            }
            Instruction::MoveRight(n) => {
                let target = (self.data_pointer as isize).saturating_add(*n as isize);
                if let Some(halt) = self.move_to(target)? {
                    return Ok(Some(halt));
                }
            }
            Instruction::MoveLeft(n) => {
                let target = (self.data_pointer as isize).saturating_sub(*n as isize);
                if let Some(halt) = self.move_to(target)? {
                    return Ok(Some(halt));
                }
            }
            Instruction::Output(n) => {
                let byte = [self.memory[self.data_pointer] as u8];
                for _ in 0..*n {
                    if let Err(e) = self.output.write_all(&byte) {
                        return Err(self.abort(ip, StreamError::Write(e)));
                    }
                }
            }
            Instruction::Input(n) => {
                if let Err(e) = self.output.flush() {
                    return Err(self.abort(ip, StreamError::Write(e)));
                }
                let mut byte = [0u8];
                for _ in 0..*n {
                    if let Err(e) = self.input.read_exact(&mut byte) {
                        return Err(self.abort(ip, StreamError::from_read(e)));
                    }
                    self.memory[self.data_pointer] = Cell::from(byte[0]);
                }
            }
            Instruction::LoopOpen(close) => {
                if self.memory[self.data_pointer] == 0 {
                    self.instruction_pointer = close + 1;
                    return Ok(None);
                }
            }
            Instruction::LoopClose(open) => {
                if self.memory[self.data_pointer] != 0 {
                    self.instruction_pointer = open + 1;
                    return Ok(None);
                }
            }
            Instruction::Custom { name, arg } => {
                let mut view = MachineView::new(&mut self.memory, self.data_pointer);
                dispatch.dispatch(name, *arg, &mut view);
            }
        }

        self.instruction_pointer += 1;
        Ok(None)
    }

    /// 记录读写失败，之后的 `step` 都返回 `Aborted`
    fn abort(&mut self, instruction: usize, source: StreamError) -> RuntimeError {
        self.aborted = Some(instruction);
        RuntimeError::Stream {
            instruction,
            source,
        }
    }

    /// 移动数据指针；越界时按策略停机或报错
    fn move_to(&mut self, target: isize) -> Result<Option<Halt>, RuntimeError> {
        if target >= 0 && (target as usize) < self.memory.len() {
            self.data_pointer = target as usize;
            return Ok(None);
        }

        let instruction = self.instruction_pointer;
        let halt = Halt::OutOfBounds {
            instruction,
            target,
        };
        self.halted = Some(halt);
        self.instruction_pointer += 1;

        match self.bounds {
            BoundsPolicy::Halt => {
                warn!(
                    target: targets::VM,
                    instruction,
                    data_pointer = target,
                    "data pointer left the tape, halting"
                );
                Ok(Some(halt))
            }
            BoundsPolicy::Error => Err(RuntimeError::OutOfBounds {
                instruction,
                target,
                len: self.memory.len(),
            }),
        }
    }
}
