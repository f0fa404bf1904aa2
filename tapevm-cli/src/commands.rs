//! 内置自定义指令
//!
//! - `{increment}N`：当前格加 N
//! - `{power}N`：当前格取 N 次幂（溢出回绕）
//! - `{memory}N`：打印前 N 个格子，N 为 0 时打印整条纸带

use std::io::Write;

use tapevm_api::{Cell, CustomDispatch, MachineView};
use tracing::warn;

use crate::LOG_TARGET;

/// 内置指令分发器，`{memory}` 的输出写到 `sink`
pub struct BuiltinCommands<W> {
    sink: W,
}

impl<W: Write> BuiltinCommands<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn dump_memory(&mut self, cells: &[Cell]) {
        let rendered: Vec<String> = cells.iter().map(Cell::to_string).collect();
        if let Err(e) = write!(self.sink, "\nMemory: [{}]\n", rendered.join(" ")) {
            warn!(target: LOG_TARGET, "failed to print memory: {}", e);
        }
    }
}

impl<W: Write> CustomDispatch for BuiltinCommands<W> {
    fn dispatch(&mut self, name: &str, arg: i64, machine: &mut MachineView<'_>) {
        match name {
            "{increment}" => {
                let value = machine.current().wrapping_add(arg);
                machine.set_current(value);
            }
            "{power}" => {
                let exponent = u32::try_from(arg).unwrap_or(u32::MAX);
                let value = machine.current().wrapping_pow(exponent);
                machine.set_current(value);
            }
            "{memory}" => {
                let memory = machine.memory();
                let count = match usize::try_from(arg) {
                    Ok(0) | Err(_) => memory.len(),
                    Ok(n) => n.min(memory.len()),
                };
                self.dump_memory(&memory[..count]);
            }
            _ => {
                warn!(target: LOG_TARGET, name, arg, "unknown custom instruction");
            }
        }
    }
}
