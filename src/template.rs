//! 模板引擎：扫描模板、按发现顺序消费参数，并把每个标记与 `{...}` 片段替换成 SQL 文本。
//!
//! 参数严格按标记从左到右出现的顺序消费，不论标记是否位于 `{...}` 内部；
//! 多余的参数被忽略。片段内消费到跳过标记时整个片段变为空串，
//! 片段内此前已消费的参数不会退回。生成的文本不会被再次扫描。

use crate::arg::Arg;
use crate::cursor::{ArgCursor, Next};
use crate::error::TemplateError;
use crate::escape::Escaper;
use crate::flavor::{Flavor, default_flavor};
use crate::format::{FormatContext, write_marker};
use crate::marker::Marker;
use crate::scanner::{SpanKind, scan};
use crate::string_builder::StringBuilder;

/// 单个标记的替换结果。
#[derive(Debug, PartialEq, Eq)]
enum Substitution {
    Text(String),
    Skip,
}

/// `{...}` 片段的求值结果。
#[derive(Debug, PartialEq, Eq)]
enum BlockOutcome {
    Text(String),
    Skipped,
}

/// 模板引擎。构造后不可变，可以在多个线程间共享（只要转义器本身可以）。
#[derive(Debug, Clone)]
pub struct QueryEngine<E: Escaper = Flavor> {
    flavor: Flavor,
    escaper: E,
}

impl QueryEngine<Flavor> {
    /// 使用当前全局默认 Flavor。
    pub fn new() -> Self {
        Self::with_flavor(default_flavor())
    }

    pub fn with_flavor(flavor: Flavor) -> Self {
        Self {
            flavor,
            escaper: flavor,
        }
    }
}

impl Default for QueryEngine<Flavor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Escaper> QueryEngine<E> {
    /// 使用自定义转义器；`flavor` 仍决定二进制与时间字面量的写法。
    pub fn with_escaper(flavor: Flavor, escaper: E) -> Self {
        Self { flavor, escaper }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// 把 `args` 依次代入 `template` 中的标记，返回最终 SQL。
    pub fn build_query<I>(&self, template: &str, args: I) -> Result<String, TemplateError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let mut cursor = ArgCursor::new(args.into_iter().map(Into::into));
        let ctx = FormatContext {
            flavor: self.flavor,
            escaper: &self.escaper,
        };

        let mut buf = StringBuilder::with_capacity(template.len());
        let mut last = 0usize;
        for span in scan(template, true) {
            buf.write_range(template, last, span.start);
            match span.kind {
                SpanKind::Block { inner } => {
                    let text = &template[inner];
                    match eval_block(text, &mut cursor, ctx)? {
                        BlockOutcome::Text(s) => buf.write_str(&s),
                        BlockOutcome::Skipped => {
                            tracing::trace!(block = text, "template block skipped");
                        }
                    }
                }
                SpanKind::Marker { suffix } => {
                    let marker = Marker::from_suffix(&template[suffix])?;
                    match substitute(marker, &mut cursor, ctx)? {
                        Substitution::Text(s) => buf.write_str(&s),
                        Substitution::Skip => {
                            return Err(TemplateError::UnexpectedSkip(marker.token().to_string()));
                        }
                    }
                }
            }
            last = span.end;
        }
        buf.write_range(template, last, template.len());

        tracing::debug!(
            template_len = template.len(),
            output_len = buf.len(),
            consumed = cursor.consumed(),
            unused = cursor.remaining(),
            "template query built"
        );
        Ok(buf.into_string())
    }
}

/// 对片段内部只扫描标记；遇到跳过标记立即返回 `Skipped`。
fn eval_block(
    inner: &str,
    cursor: &mut ArgCursor,
    ctx: FormatContext<'_>,
) -> Result<BlockOutcome, TemplateError> {
    let mut buf = StringBuilder::with_capacity(inner.len());
    let mut last = 0usize;
    for span in scan(inner, false) {
        buf.write_range(inner, last, span.start);
        match span.kind {
            SpanKind::Marker { suffix } => {
                let marker = Marker::from_suffix(&inner[suffix])?;
                match substitute(marker, cursor, ctx)? {
                    Substitution::Text(s) => buf.write_str(&s),
                    Substitution::Skip => return Ok(BlockOutcome::Skipped),
                }
            }
            SpanKind::Block { .. } => buf.write_range(inner, span.start, span.end),
        }
        last = span.end;
    }
    buf.write_range(inner, last, inner.len());
    Ok(BlockOutcome::Text(buf.into_string()))
}

fn substitute(
    marker: Marker,
    cursor: &mut ArgCursor,
    ctx: FormatContext<'_>,
) -> Result<Substitution, TemplateError> {
    match cursor.next_arg(marker)? {
        Next::Skip => Ok(Substitution::Skip),
        Next::Value(arg) => {
            let mut out = String::new();
            write_marker(&mut out, marker, arg, ctx)?;
            Ok(Substitution::Text(out))
        }
    }
}

/// 使用全局默认 Flavor 构建查询。
pub fn build_query<I>(template: &str, args: I) -> Result<String, TemplateError>
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    QueryEngine::new().build_query(template, args)
}
