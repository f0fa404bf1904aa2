//! 运行时：纸带虚拟机与自定义指令分发

pub mod dispatch;
pub mod error;
pub mod machine;

pub use dispatch::{CustomDispatch, MachineView, NoDispatch};
pub use error::{RuntimeError, StreamError};
pub use machine::{Cell, Halt, Machine};
