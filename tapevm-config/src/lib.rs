//! Tapevm Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Tapevm crates.

use serde::Deserialize;

/// Conventional tape length
pub const DEFAULT_MEMORY_SIZE: usize = 30_000;

/// Configuration for compiler behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Whether `{name}arg` is recognized; when off, braces are comments
    pub custom_instructions: bool,
}

/// What the machine does when the data pointer leaves the tape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Stop quietly and report the halt in the outcome
    #[default]
    Halt,
    /// Fail the execution with an out-of-bounds error
    Error,
}

/// Configuration for the machine and its execution limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Number of cells on the tape
    pub memory_size: usize,
    /// Behaviour on a data pointer overrun
    pub bounds: BoundsPolicy,
    /// Maximum executed instructions; `None` means unlimited
    pub max_steps: Option<u64>,
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Validator,
    Compiler,
    Vm,
    Cli,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Validator => "validator",
            Phase::Compiler => "compiler",
            Phase::Vm => "vm",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("tapevm::{}", self.as_str())
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            custom_instructions: true,
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            bounds: BoundsPolicy::Halt,
            max_steps: None,
        }
    }
}
