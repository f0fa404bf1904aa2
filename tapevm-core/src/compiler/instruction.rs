//! 指令定义

use std::fmt;

/// 操作码种类（不带操作数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Increment,
    Decrement,
    MoveRight,
    MoveLeft,
    Output,
    Input,
    LoopOpen,
    LoopClose,
    Custom,
}

impl OpKind {
    /// 源码中对应的符号
    pub fn symbol(&self) -> char {
        match self {
            OpKind::Increment => '+',
            OpKind::Decrement => '-',
            OpKind::MoveRight => '>',
            OpKind::MoveLeft => '<',
            OpKind::Output => '.',
            OpKind::Input => ',',
            OpKind::LoopOpen => '[',
            OpKind::LoopClose => ']',
            OpKind::Custom => '{',
        }
    }

    /// 可游程合并的六个单字符操作符
    pub fn from_run_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'+' => Some(OpKind::Increment),
            b'-' => Some(OpKind::Decrement),
            b'>' => Some(OpKind::MoveRight),
            b'<' => Some(OpKind::MoveLeft),
            b'.' => Some(OpKind::Output),
            b',' => Some(OpKind::Input),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Increment => "Increment",
            OpKind::Decrement => "Decrement",
            OpKind::MoveRight => "MoveRight",
            OpKind::MoveLeft => "MoveLeft",
            OpKind::Output => "Output",
            OpKind::Input => "Input",
            OpKind::LoopOpen => "LoopOpen",
            OpKind::LoopClose => "LoopClose",
            OpKind::Custom => "Custom",
        }
    }
}

/// 编译后的单条指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// 当前格加 n
    Increment(usize),
    /// 当前格减 n
    Decrement(usize),
    /// 数据指针右移 n
    MoveRight(usize),
    /// 数据指针左移 n
    MoveLeft(usize),
    /// 输出当前格 n 次
    Output(usize),
    /// 读入 n 个字节到当前格，只保留最后一个
    Input(usize),
    /// The `usize` here is the index of the corresponding LoopClose.
    LoopOpen(usize),
    /// The `usize` here is the index of the corresponding LoopOpen.
    LoopClose(usize),
    /// `{name}arg`，名字带花括号
    Custom { name: String, arg: i64 },
}

impl Instruction {
    /// 构造可游程合并的指令
    pub(crate) fn run(kind: OpKind, repeat: usize) -> Self {
        match kind {
            OpKind::Increment => Instruction::Increment(repeat),
            OpKind::Decrement => Instruction::Decrement(repeat),
            OpKind::MoveRight => Instruction::MoveRight(repeat),
            OpKind::MoveLeft => Instruction::MoveLeft(repeat),
            OpKind::Output => Instruction::Output(repeat),
            OpKind::Input => Instruction::Input(repeat),
            OpKind::LoopOpen | OpKind::LoopClose | OpKind::Custom => {
                unreachable!("{} is never run-length grouped", kind.name())
            }
        }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Instruction::Increment(_) => OpKind::Increment,
            Instruction::Decrement(_) => OpKind::Decrement,
            Instruction::MoveRight(_) => OpKind::MoveRight,
            Instruction::MoveLeft(_) => OpKind::MoveLeft,
            Instruction::Output(_) => OpKind::Output,
            Instruction::Input(_) => OpKind::Input,
            Instruction::LoopOpen(_) => OpKind::LoopOpen,
            Instruction::LoopClose(_) => OpKind::LoopClose,
            Instruction::Custom { .. } => OpKind::Custom,
        }
    }

    /// 合并的源操作符个数；循环和自定义指令恒为 1
    pub fn repeat(&self) -> usize {
        match *self {
            Instruction::Increment(n)
            | Instruction::Decrement(n)
            | Instruction::MoveRight(n)
            | Instruction::MoveLeft(n)
            | Instruction::Output(n)
            | Instruction::Input(n) => n,
            Instruction::LoopOpen(_) | Instruction::LoopClose(_) | Instruction::Custom { .. } => 1,
        }
    }

    /// 循环指令的配对下标；其余指令为 0
    pub fn jump_target(&self) -> usize {
        match *self {
            Instruction::LoopOpen(target) | Instruction::LoopClose(target) => target,
            _ => 0,
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Instruction::Custom { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn custom_arg(&self) -> Option<i64> {
        match self {
            Instruction::Custom { arg, .. } => Some(*arg),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoopOpen(target) | Instruction::LoopClose(target) => {
                write!(f, "{:<10} -> {}", self.kind().name(), target)
            }
            Instruction::Custom { name, arg } => {
                write!(f, "{:<10} {} {}", self.kind().name(), name, arg)
            }
            _ => write!(f, "{:<10} x{}", self.kind().name(), self.repeat()),
        }
    }
}
