//! Tapevm Core - Core compiler (pure logic, no file IO)
//!
//! Contains the bracket validator, the run-length compiler, and the tape machine.
//! The machine talks to the outside world only through the `Read`/`Write`
//! streams and the custom dispatch capability handed to it.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod compiler;
pub mod kit;
pub mod runtime;

// Re-export common types
pub use compiler::{compile, ArgumentError, Compiled, Compiler, Instruction, OpKind, Program, SyntaxError};
pub use runtime::{Cell, CustomDispatch, Halt, Machine, MachineView, NoDispatch, RuntimeError, StreamError};

// Re-export config types from tapevm-config
pub use tapevm_config::{BoundsPolicy, CompilerConfig, MachineConfig, Phase};

/// Log targets, one per phase (see `Phase::target`)
pub(crate) mod targets {
    pub const VALIDATOR: &str = "tapevm::validator";
    pub const COMPILER: &str = "tapevm::compiler";
    pub const VM: &str = "tapevm::vm";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_match_phases() {
        assert_eq!(targets::VALIDATOR, Phase::Validator.target());
        assert_eq!(targets::COMPILER, Phase::Compiler.target());
        assert_eq!(targets::VM, Phase::Vm.target());
    }
}
