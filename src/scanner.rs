//! 模板扫描：从左到右找出所有 `{...}` 片段与占位标记，输出互不重叠、带位置的区间。
//!
//! 识别规则：
//! - 标记是 `?` 加上可选的单字符后缀（ASCII 字母数字或 `#`）；
//!   只有紧跟在 `(`、`=`、空白之后（或位于被扫描文本开头）时才算标记，
//!   并且必须以 `)`、空白或文本结尾收尾。其余的 `?` 一律按字面量处理。
//! - 片段是 `{` 到其后最近的 `}`；没有匹配 `}` 的 `{` 按字面量处理。
//!   片段不支持嵌套，内部的 `{` 只是普通字符。

use std::ops::Range;

/// 扫描得到的区间类型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    /// `{...}`，`inner` 为花括号内部（不含花括号）在原文中的位置。
    Block { inner: Range<usize> },
    /// 占位标记，`suffix` 为 `?` 之后后缀在原文中的位置（可能为空）。
    Marker { suffix: Range<usize> },
}

/// 一个待替换的区间，`start..end` 覆盖整个原文片段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

/// 惰性扫描器；`allow_blocks == false` 时只识别标记（用于片段内部）。
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    allow_blocks: bool,
    /// 已确认当前位置之后不再有 `}`。
    no_close: bool,
}

/// 扫描 `text`，按出现顺序返回所有区间。
pub fn scan(text: &str, allow_blocks: bool) -> Scanner<'_> {
    Scanner {
        text,
        pos: 0,
        allow_blocks,
        no_close: false,
    }
}

impl Scanner<'_> {
    fn marker_at(&self, i: usize) -> Option<Span> {
        let bytes = self.text.as_bytes();
        if i > 0 && !is_marker_lead(bytes[i - 1]) {
            return None;
        }

        let k = i + 1;
        if k >= bytes.len() || is_marker_tail(bytes[k]) {
            return Some(Span {
                start: i,
                end: k,
                kind: SpanKind::Marker { suffix: k..k },
            });
        }

        let c = bytes[k];
        if !(c.is_ascii_alphanumeric() || c == b'#') {
            return None;
        }
        let m = k + 1;
        if m < bytes.len() && !is_marker_tail(bytes[m]) {
            return None;
        }
        Some(Span {
            start: i,
            end: m,
            kind: SpanKind::Marker { suffix: k..m },
        })
    }

    fn block_at(&mut self, i: usize) -> Option<Span> {
        if self.no_close {
            return None;
        }
        let Some(rel) = self.text[i + 1..].find('}') else {
            self.no_close = true;
            return None;
        };
        let close = rel + i + 1;
        Some(Span {
            start: i,
            end: close + 1,
            kind: SpanKind::Block {
                inner: i + 1..close,
            },
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() {
            let found = match bytes[i] {
                b'{' if self.allow_blocks => self.block_at(i),
                b'?' => self.marker_at(i),
                _ => None,
            };
            if let Some(span) = found {
                self.pos = span.end;
                return Some(span);
            }
            i += 1;
        }
        self.pos = bytes.len();
        None
    }
}

fn is_marker_lead(b: u8) -> bool {
    b == b'(' || b == b'=' || b.is_ascii_whitespace()
}

fn is_marker_tail(b: u8) -> bool {
    b == b')' || b.is_ascii_whitespace()
}
