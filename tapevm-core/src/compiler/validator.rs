//! 括号校验
//!
//! 编译前的单遍检查：任何不匹配的 `[` / `]` 都在生成指令之前被拒绝，
//! 编译器因此不需要回滚逻辑。

use tracing::trace;

use super::error::SyntaxError;
use crate::kit::{SourcePosition, Stack};
use crate::targets;

/// 校验源码中的括号是否成对且正确嵌套
pub fn validate(source: &str) -> Result<(), SyntaxError> {
    let mut open_brackets: Stack<SourcePosition> = Stack::new();
    let mut position = SourcePosition::start();

    for c in source.chars() {
        match c {
            '[' => open_brackets.push(position),
            ']' => {
                if open_brackets.pop().is_none() {
                    return Err(SyntaxError::UnmatchedClose { position });
                }
            }
            _ => {}
        }
        position.advance(c);
    }

    if let Some(&position) = open_brackets.peek() {
        return Err(SyntaxError::UnmatchedOpen { position });
    }

    trace!(target: targets::VALIDATOR, bytes = source.len(), "brackets balanced");
    Ok(())
}
