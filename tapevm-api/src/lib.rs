//! Tapevm API - Execution orchestration layer
//!
//! Provides unified execution interface, including:
//! - Execution flow orchestration (validate → compile → execute)
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (TapeError)
//!
//! For CLI convenience, this crate provides a global singleton config.
//! For library use, prefer the explicit `run(source, .., &config)` API.

use std::io::{Read, Write};

use tracing::{debug, info};

use tapevm_core::{Compiler, Machine};

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export config types from tapevm_config
pub use tapevm_config::{BoundsPolicy, CompilerConfig, MachineConfig, Phase};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::{ArgumentError, ErrorReport, RuntimeError, StreamError, SyntaxError, TapeError};
pub use types::{CompileOutput, ExecuteOutput};

// Re-export core types
pub use tapevm_config;
pub use tapevm_core::{Cell, CustomDispatch, Halt, Instruction, MachineView, NoDispatch, OpKind, Program};

/// Log targets, one per phase (see `Phase::target`)
mod targets {
    pub const COMPILER: &str = "tapevm::compiler";
    pub const VM: &str = "tapevm::vm";
}

/// Compile and execute with explicit configuration
///
/// This is the recommended API for library users.
pub fn run<R: Read, W: Write>(
    source: &str,
    input: R,
    output: W,
    dispatch: Option<&mut dyn CustomDispatch>,
    config: &RunConfig,
) -> Result<ExecuteOutput, TapeError> {
    info!(target: targets::VM, "Starting execution");

    let compiled = compile_with_config(source, config)?;

    if config.dump_program {
        info!(target: targets::COMPILER, "program listing:\n{}", compiled.program.disassemble("main"));
    }

    let result = execute_with_config(&compiled.program, input, output, dispatch, config)?;

    info!(target: targets::VM, "Execution completed");
    Ok(result)
}

/// Compile with explicit configuration
pub fn compile_with_config(source: &str, config: &RunConfig) -> Result<CompileOutput, TapeError> {
    let compiler = Compiler::with_config(config.compiler.clone());
    let compiled = compiler.compile(source)?;

    debug!(
        target: targets::COMPILER,
        "compilation completed: instructions={}, diagnostics={}",
        compiled.program.len(),
        compiled.diagnostics.len(),
    );

    Ok(CompileOutput {
        program: compiled.program,
        diagnostics: compiled.diagnostics,
    })
}

/// Execute a compiled program with explicit configuration
pub fn execute_with_config<R: Read, W: Write>(
    program: &Program,
    input: R,
    output: W,
    dispatch: Option<&mut dyn CustomDispatch>,
    config: &RunConfig,
) -> Result<ExecuteOutput, TapeError> {
    let mut machine = Machine::with_config(program, input, output, &config.machine);
    let halt = match dispatch {
        Some(dispatch) => machine.execute_with(dispatch)?,
        None => machine.execute()?,
    };

    let steps = machine.steps();
    let data_pointer = machine.data_pointer();
    let (memory, _) = machine.into_parts();
    Ok(ExecuteOutput {
        halt,
        steps,
        data_pointer,
        memory,
    })
}

/// Run against an in-memory input, capturing the output bytes
pub fn run_to_vec(
    source: &str,
    input: &[u8],
    dispatch: Option<&mut dyn CustomDispatch>,
    config: &RunConfig,
) -> Result<(ExecuteOutput, Vec<u8>), TapeError> {
    let mut output = Vec::new();
    let result = run(source, input, &mut output, dispatch, config)?;
    Ok((result, output))
}

/// Quick run with the global config (installs the default if needed)
pub fn quick_run(source: &str, input: &[u8]) -> Result<Vec<u8>, TapeError> {
    run_to_vec(source, input, None, get_config()).map(|(_, output)| output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_targets_match_phases() {
        assert_eq!(targets::COMPILER, Phase::Compiler.target());
        assert_eq!(targets::VM, Phase::Vm.target());
    }

    #[test]
    fn test_run_with_explicit_config() {
        let config = RunConfig::default();
        let (result, output) = run_to_vec("+++>++++++++++<,.,.", b"123", None, &config).unwrap();
        assert_eq!(output, b"12");
        assert_eq!(result.halt, Halt::Completed);
        assert_eq!(result.data_pointer, 0);
        assert_eq!(&result.memory[..2], &[50, 10]);
    }

    #[test]
    fn test_quick_run() {
        let output = quick_run(",[.,]", b"echo\0").unwrap();
        assert_eq!(output, b"echo");
    }

    #[test]
    fn test_compile_reports_diagnostics() {
        let output = compile_with_config("{power}99999999999999999999", &RunConfig::default()).unwrap();
        assert_eq!(output.program.len(), 1);
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_syntax_error_stops_before_execution() {
        let err = run_to_vec(",[.", b"abc", None, &RunConfig::default()).unwrap_err();
        assert!(matches!(err, TapeError::Syntax(_)));
    }

    #[test]
    fn test_strict_bounds() {
        let config = RunConfig::default().with_machine(MachineConfig {
            bounds: BoundsPolicy::Error,
            ..MachineConfig::default()
        });
        let err = run_to_vec("<", b"", None, &config).unwrap_err();
        assert_eq!(err.to_report().error_kind, "OutOfBounds");

        let (result, _) = run_to_vec("<", b"", None, &RunConfig::default()).unwrap();
        assert_eq!(
            result.halt,
            Halt::OutOfBounds {
                instruction: 0,
                target: -1,
            }
        );
    }

    #[test]
    fn test_custom_dispatch_through_api() {
        let mut increment = |name: &str, arg: i64, view: &mut MachineView<'_>| {
            if name == "{increment}" {
                *view.current_mut() += arg;
            }
        };
        let (_, output) = run_to_vec(
            "{increment}72.>{increment}105.",
            b"",
            Some(&mut increment),
            &RunConfig::default(),
        )
        .unwrap();
        assert_eq!(output, b"Hi");
    }
}
