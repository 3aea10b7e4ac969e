//! 模板构建错误。

use crate::valuer::ValuerError;

/// `build_query` 的失败原因；除 `{...}` 内的跳过外，任何错误都会让整次构建失败。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template unknown marker `?{0}`")]
    UnknownMarker(String),
    #[error("template not enough args for marker `{0}`")]
    ArgumentsExhausted(String),
    /// 跳过标记被 `{...}` 之外的标记消费。
    #[error("template skip arg consumed by top-level marker `{0}`")]
    UnexpectedSkip(String),
    #[error("template invalid arg for marker `{marker}`: {reason}")]
    InvalidArgumentType {
        marker: &'static str,
        reason: String,
    },
    #[error("{0}")]
    Valuer(#[from] ValuerError),
}

impl TemplateError {
    pub(crate) fn invalid(marker: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgumentType {
            marker,
            reason: reason.into(),
        }
    }
}
