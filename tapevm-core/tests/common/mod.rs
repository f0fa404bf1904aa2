//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use tapevm_core::{compile, Cell, CustomDispatch, Halt, Machine, Program, RuntimeError};

/// 执行结果
#[derive(Debug)]
pub struct ExecResult {
    pub halt: Halt,
    pub output: Vec<u8>,
    pub memory: Vec<Cell>,
}

/// 编译并执行源码（默认配置，无自定义分发）
///
/// # Example
/// ```ignore
/// let result = run_code(",.", b"a").unwrap();
/// assert_eq!(result.output, b"a");
/// ```
pub fn run_code(code: &str, input: &[u8]) -> Result<ExecResult, RuntimeError> {
    let program = compile(code).expect("source should compile");
    run_program(&program, input, None)
}

/// 执行已编译的程序
pub fn run_program(
    program: &Program,
    input: &[u8],
    dispatch: Option<&mut dyn CustomDispatch>,
) -> Result<ExecResult, RuntimeError> {
    let mut machine = Machine::new(program, input, Vec::new());
    let halt = match dispatch {
        Some(dispatch) => machine.execute_with(dispatch)?,
        None => machine.execute()?,
    };
    let (memory, output) = machine.into_parts();
    Ok(ExecResult {
        halt,
        output,
        memory,
    })
}

/// 简单的线性同余生成器，测试里用来造输入
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// 生成括号平衡的随机源码
pub fn balanced_source(rng: &mut Lcg, len: usize) -> String {
    const OPS: &[u8] = b"+-<>.,x ";
    let mut out = String::new();
    let mut depth = 0usize;
    for _ in 0..len {
        match rng.below(10) {
            0 => {
                out.push('[');
                depth += 1;
            }
            1 if depth > 0 => {
                out.push(']');
                depth -= 1;
            }
            _ => out.push(OPS[rng.below(OPS.len() as u64) as usize] as char),
        }
    }
    out.extend(std::iter::repeat(']').take(depth));
    out
}
