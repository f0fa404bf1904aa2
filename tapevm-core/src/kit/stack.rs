//! LIFO 栈
//!
//! 括号校验和编译时的括号回填都基于它。

/// 后进先出栈
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// 创建空栈
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 压栈
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// 弹栈，空栈返回 `None`
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// 查看栈顶
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
