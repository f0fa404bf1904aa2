//! 编译器：源码 -> 跳转已回填的指令序列
//!
//! 单遍从左到右扫描：
//! - 六个单字符操作符做游程合并，一段相同字符只生成一条指令
//! - `[` 先写入占位目标并压栈，遇到对应的 `]` 时回填
//! - `{name}digits` 生成自定义指令，匹配失败的 `{` 当作注释
//! - 其余字符都是注释

use tracing::{debug, warn};

use super::error::{ArgumentError, SyntaxError};
use super::instruction::{Instruction, OpKind};
use super::program::Program;
use super::validator;
use crate::kit::{SourcePosition, Stack};
use crate::targets;
use tapevm_config::CompilerConfig;

/// 编译结果：指令序列加上非致命诊断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub program: Program,
    pub diagnostics: Vec<ArgumentError>,
}

/// 编译器
///
/// 只持有配置；扫描状态属于每次 `compile` 调用，调用之间互不影响。
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// 编译源码；括号不匹配时不生成任何指令
    pub fn compile(&self, source: &str) -> Result<Compiled, SyntaxError> {
        validator::validate(source)?;

        let mut scan = Scan::new(source, &self.config);
        scan.run()?;

        debug!(
            target: targets::COMPILER,
            source_bytes = source.len(),
            instructions = scan.instructions.len(),
            diagnostics = scan.diagnostics.len(),
            "compilation completed"
        );

        Ok(Compiled {
            program: Program::new(scan.instructions),
            diagnostics: scan.diagnostics,
        })
    }
}

/// 用默认配置编译，丢弃诊断（诊断仍会写入日志）
pub fn compile(source: &str) -> Result<Program, SyntaxError> {
    Compiler::new().compile(source).map(|compiled| compiled.program)
}

/// 一次编译的扫描状态
struct Scan<'a> {
    source: &'a str,
    bytes: &'a [u8],
    position: usize,
    custom_instructions: bool,
    loop_stack: Stack<usize>,
    instructions: Vec<Instruction>,
    diagnostics: Vec<ArgumentError>,
}

/// `{name}digits` 的匹配长度
struct CustomMatch {
    /// `{name}` 的字节数
    name_len: usize,
    /// 紧随其后的数字个数
    digits_len: usize,
}

impl<'a> Scan<'a> {
    fn new(source: &'a str, config: &CompilerConfig) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            position: 0,
            custom_instructions: config.custom_instructions,
            loop_stack: Stack::new(),
            instructions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), SyntaxError> {
        while let Some(&current) = self.bytes.get(self.position) {
            if let Some(kind) = OpKind::from_run_symbol(current) {
                let repeat = self.take_run(current);
                self.emit(Instruction::run(kind, repeat));
                continue;
            }

            match current {
                b'[' => {
                    let open = self.emit(Instruction::LoopOpen(0));
                    self.loop_stack.push(open);
                    self.position += 1;
                }
                b']' => {
                    let Some(open) = self.loop_stack.pop() else {
                        return Err(SyntaxError::UnmatchedClose {
                            position: SourcePosition::locate(self.source, self.position),
                        });
                    };
                    let close = self.emit(Instruction::LoopClose(open));
                    self.instructions[open] = Instruction::LoopOpen(close);
                    self.position += 1;
                }
                b'{' if self.custom_instructions => match self.match_custom() {
                    Some(found) => self.emit_custom(found),
                    None => self.position += 1,
                },
                _ => self.position += 1,
            }
        }
        Ok(())
    }

    /// 消费一段相同字符，返回长度
    fn take_run(&mut self, symbol: u8) -> usize {
        let start = self.position;
        while self.bytes.get(self.position) == Some(&symbol) {
            self.position += 1;
        }
        self.position - start
    }

    /// 在当前 `{` 处尝试匹配 `{[a-z]+}[0-9]*`
    fn match_custom(&self) -> Option<CustomMatch> {
        let rest = &self.bytes[self.position..];
        let letters = rest[1..]
            .iter()
            .take_while(|b| b.is_ascii_lowercase())
            .count();
        if letters == 0 || rest.get(letters + 1) != Some(&b'}') {
            return None;
        }

        let name_len = letters + 2;
        let digits_len = rest[name_len..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        Some(CustomMatch {
            name_len,
            digits_len,
        })
    }

    fn emit_custom(&mut self, found: CustomMatch) {
        let start = self.position;
        let name_end = start + found.name_len;
        let name = &self.source[start..name_end];
        let literal = &self.source[name_end..name_end + found.digits_len];

        let arg = if literal.is_empty() {
            0
        } else {
            match literal.parse::<i64>() {
                Ok(value) => value,
                Err(source) => {
                    let error = ArgumentError {
                        name: name.to_string(),
                        literal: literal.to_string(),
                        position: SourcePosition::locate(self.source, start),
                        source,
                    };
                    warn!(target: targets::COMPILER, "{error}; using 0");
                    self.diagnostics.push(error);
                    0
                }
            }
        };

        self.emit(Instruction::Custom {
            name: name.to_string(),
            arg,
        });
        self.position = name_end + found.digits_len;
    }

    /// 追加指令，返回其下标
    fn emit(&mut self, instruction: Instruction) -> usize {
        self.instructions.push(instruction);
        self.instructions.len() - 1
    }
}
