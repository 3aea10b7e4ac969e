//! 字符串字面量与标识符的转义。
//!
//! `Escaper` 是引擎唯一依赖的外部能力：只负责转义内容，外层单引号由引擎加上。

/// 字符串内容转义器。
pub trait Escaper {
    /// 返回可以直接放进 `'...'` 的 `raw`。
    fn escape_string(&self, raw: &str) -> String;
}

impl<F> Escaper for F
where
    F: Fn(&str) -> String,
{
    fn escape_string(&self, raw: &str) -> String {
        self(raw)
    }
}

/// MySQL 风格：用反斜杠转义控制字符与引号。
pub fn escape_mysql(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        match ch {
            '\u{0000}' => out.push_str("\\0"),
            '\u{0008}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{001a}' => out.push_str("\\Z"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

/// `escape_mysql` 的逆操作；未知的转义序列按 MySQL 规则保留被转义的字符本身。
pub fn unescape_mysql(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\u{0000}'),
            Some('b') => out.push('\u{0008}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('Z') => out.push('\u{001a}'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// 标准 SQL 风格：单引号写两次，其余字符原样保留。
pub fn escape_standard(raw: &str) -> String {
    raw.replace('\'', "''")
}

/// 用反引号包裹标识符，内部的反引号写两次。
pub fn quote_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
    out
}
