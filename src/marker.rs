//! 类型化占位标记。

use crate::error::TemplateError;
use std::fmt;

/// 模板中的占位标记类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `?`：按参数的运行时类型格式化。
    Any,
    /// `?d`
    Int,
    /// `?f`
    Float,
    /// `?a`：列表或 `列名 = 值` 映射。
    Array,
    /// `?#`：一个或多个标识符。
    Identifier,
}

impl Marker {
    /// 按 `?` 之后的后缀识别标记，大小写不敏感。
    pub fn from_suffix(suffix: &str) -> Result<Self, TemplateError> {
        let mut chars = suffix.chars();
        let m = match (chars.next(), chars.next()) {
            (None, _) => Self::Any,
            (Some(c), None) => match c.to_ascii_lowercase() {
                'd' => Self::Int,
                'f' => Self::Float,
                'a' => Self::Array,
                '#' => Self::Identifier,
                _ => return Err(TemplateError::UnknownMarker(suffix.to_string())),
            },
            _ => return Err(TemplateError::UnknownMarker(suffix.to_string())),
        };
        Ok(m)
    }

    /// 标记的规范写法。
    pub fn token(self) -> &'static str {
        match self {
            Self::Any => "?",
            Self::Int => "?d",
            Self::Float => "?f",
            Self::Array => "?a",
            Self::Identifier => "?#",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::Marker;
    use crate::error::TemplateError;
    use pretty_assertions::assert_eq;

    #[test]
    fn suffix_lookup_is_case_insensitive() {
        let cases = vec![
            ("", Marker::Any),
            ("d", Marker::Int),
            ("D", Marker::Int),
            ("f", Marker::Float),
            ("F", Marker::Float),
            ("a", Marker::Array),
            ("A", Marker::Array),
            ("#", Marker::Identifier),
        ];
        for (suffix, expected) in cases {
            assert_eq!(Marker::from_suffix(suffix), Ok(expected));
        }
    }

    #[test]
    fn unknown_suffix() {
        assert_eq!(
            Marker::from_suffix("z"),
            Err(TemplateError::UnknownMarker("z".into()))
        );
    }

    #[test]
    fn display_is_token() {
        assert_eq!(Marker::Identifier.to_string(), "?#");
    }
}
