//! 参数游标：按调用顺序逐个交出参数。

use crate::arg::Arg;
use crate::error::TemplateError;
use crate::marker::Marker;

/// `ArgCursor::next_arg` 的结果：普通参数或跳过标记。
#[derive(Debug, PartialEq)]
pub enum Next {
    Value(Arg),
    Skip,
}

/// 单次构建独占的参数游标。内部把参数倒序存放，从尾部弹出。
#[derive(Debug)]
pub struct ArgCursor {
    stack: Vec<Arg>,
    consumed: usize,
}

impl ArgCursor {
    pub fn new(args: impl IntoIterator<Item = Arg>) -> Self {
        let mut stack: Vec<Arg> = args.into_iter().collect();
        stack.reverse();
        Self { stack, consumed: 0 }
    }

    /// 取出下一个参数；参数耗尽时返回 `ArgumentsExhausted`。
    pub fn next_arg(&mut self, marker: Marker) -> Result<Next, TemplateError> {
        let arg = self
            .stack
            .pop()
            .ok_or_else(|| TemplateError::ArgumentsExhausted(marker.token().to_string()))?;
        self.consumed += 1;
        Ok(match arg {
            Arg::Skip => Next::Skip,
            other => Next::Value(other),
        })
    }

    pub fn remaining(&self) -> usize {
        self.stack.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}
