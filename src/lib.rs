//! halo-sql-template：带类型占位符与可选片段的 SQL 模板引擎。

pub mod arg;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod flavor;
mod format;
pub mod macros;
pub mod marker;
pub mod scanner;
mod string_builder;
pub mod template;
#[cfg(test)]
mod template_tests;
pub mod value;
pub mod valuer;

pub use crate::arg::{Arg, list, map, skip};
pub use crate::cursor::{ArgCursor, Next};
pub use crate::error::TemplateError;
pub use crate::escape::{Escaper, escape_mysql, escape_standard, quote_identifier, unescape_mysql};
pub use crate::flavor::{Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped};
pub use crate::marker::Marker;
pub use crate::scanner::{Scanner, Span, SpanKind, scan};
pub use crate::template::{QueryEngine, build_query};
pub use crate::value::{SqlDateTime, SqlValue};
pub use crate::valuer::{SqlValuer, ValuerError};

/// 便捷命名空间：允许 `use halo_space::prelude::*` 一次性导入。
pub mod prelude {
    pub use crate::*;
}
