//! 编译器共用的小工具

pub mod position;
pub mod stack;

pub use position::SourcePosition;
pub use stack::Stack;
