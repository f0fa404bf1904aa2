//! 编译器模块

pub mod compiler;
pub mod error;
pub mod instruction;
pub mod program;
pub mod validator;

pub use compiler::{compile, Compiled, Compiler};
pub use error::{ArgumentError, SyntaxError};
pub use instruction::{Instruction, OpKind};
pub use program::Program;
