//! Tapevm - a tape machine for brainfuck-style programs
//!
//! Eight one-character operators (`+ - < > . , [ ]`) plus `{name}arg`
//! custom instructions that are handed to caller-supplied logic.
//!
//! # Architecture
//!
//! ```text
//! tapevm-config/  - Pure configuration data
//! tapevm-core/    - Validator, compiler and machine (no file IO)
//! tapevm-api/     - Execution orchestration and unified errors
//! tapevm-cli/     - `tapevm` binary
//! ```
//!
//! # Quick Start
//!
//! ```
//! use tapevm_workspace::{run_to_vec, RunConfig};
//!
//! let (_, output) = run_to_vec("+++>++++++++++<,.,.", b"123", None, &RunConfig::default()).unwrap();
//! assert_eq!(output, b"12");
//! ```

pub use tapevm_api::*;
