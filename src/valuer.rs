//! SqlValuer：占位时不确定、直到被标记消费才计算的参数。
//!
//! - 只有当某个标记真正消费到该参数时才调用 `value()`；排在跳过标记之后、
//!   因片段被取消而未被消费的 valuer 不会被求值。
//! - 同一片段中先于跳过标记被消费的 valuer 已经求值，片段变空不会撤销这次调用。
//! - `value()` 返回错误时整次构建失败，即使该标记位于 `{...}` 内部；
//!   只有跳过标记才会被片段吸收。
//! - 求得的值按消费它的标记格式化：`?d` 要整数、`?#` 要字符串，依此类推。
//!   `?a` 列表或映射中的 valuer 按 `?` 的规则格式化。

use crate::value::SqlValue;

/// `SqlValuer::value` 的失败原因，经 `TemplateError::Valuer` 交给调用方。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template sql valuer error: {0}")]
pub struct ValuerError(pub String);

impl ValuerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// 延迟计算的模板参数。`Box<dyn SqlValuer>` 可克隆，可直接放进 `args![...]`。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
