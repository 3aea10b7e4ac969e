//! 各类标记的格式化规则：把一个参数转换成已转义的 SQL 文本。

use crate::arg::Arg;
use crate::error::TemplateError;
use crate::escape::{Escaper, quote_identifier};
use crate::flavor::Flavor;
use crate::marker::Marker;
use crate::value::{SqlDateTime, SqlValue};
use time::macros::format_description;

/// 格式化所需的环境：方言与字符串转义器。
#[derive(Clone, Copy)]
pub(crate) struct FormatContext<'a> {
    pub(crate) flavor: Flavor,
    pub(crate) escaper: &'a dyn Escaper,
}

/// 按 `marker` 的规则把 `arg` 写入 `out`。
pub(crate) fn write_marker(
    out: &mut String,
    marker: Marker,
    arg: Arg,
    ctx: FormatContext<'_>,
) -> Result<(), TemplateError> {
    match marker {
        Marker::Any => write_any(out, arg, ctx),
        Marker::Int => write_int(out, &scalar(arg, marker)?),
        Marker::Float => write_float(out, &scalar(arg, marker)?),
        Marker::Array => write_array(out, arg, ctx),
        Marker::Identifier => write_identifiers(out, arg),
    }
}

/// 取出标量值；valuer 在这里求值。
fn scalar(arg: Arg, marker: Marker) -> Result<SqlValue, TemplateError> {
    match arg {
        Arg::Value(v) => Ok(v),
        Arg::Valuer(v) => Ok(v.value()?),
        other => Err(TemplateError::invalid(
            marker.token(),
            format!("expected a scalar, got {}", other.kind_name()),
        )),
    }
}

fn write_any(out: &mut String, arg: Arg, ctx: FormatContext<'_>) -> Result<(), TemplateError> {
    let v = scalar(arg, Marker::Any)?;
    match &v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => out.push_str(if *b { "1" } else { "0" }),
        SqlValue::I64(_) | SqlValue::U64(_) => write_int(out, &v)?,
        SqlValue::F64(_) => write_float(out, &v)?,
        SqlValue::String(s) => {
            out.push('\'');
            out.push_str(&ctx.escaper.escape_string(s));
            out.push('\'');
        }
        SqlValue::Bytes(b) => write_bytes(out, b, ctx.flavor),
        SqlValue::DateTime(dt) => write_datetime(out, dt, ctx.flavor)?,
    }
    Ok(())
}

fn write_int(out: &mut String, v: &SqlValue) -> Result<(), TemplateError> {
    const M: &str = "?d";
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => out.push(if *b { '1' } else { '0' }),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::F64(f) => out.push_str(&integral_text(*f)?),
        SqlValue::String(s) => out.push_str(&integer_string(s.trim())?),
        other => {
            return Err(TemplateError::invalid(
                M,
                format!("expected an integer, got {}", other.kind_name()),
            ));
        }
    }
    Ok(())
}

fn write_float(out: &mut String, v: &SqlValue) -> Result<(), TemplateError> {
    const M: &str = "?f";
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => out.push(if *b { '1' } else { '0' }),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::F64(f) => out.push_str(&decimal_text(*f)?),
        SqlValue::String(s) => {
            let s = s.trim();
            match parse_number(s) {
                Some(f) => out.push_str(&decimal_text(f)?),
                None => {
                    return Err(TemplateError::invalid(
                        M,
                        format!("non-numeric string {s:?}"),
                    ));
                }
            }
        }
        other => {
            return Err(TemplateError::invalid(
                M,
                format!("expected a number, got {}", other.kind_name()),
            ));
        }
    }
    Ok(())
}

/// 只接受有限的数字；`"inf"`/`"NaN"` 之类视为非数字。
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// 能被 f64 精确表示的最大整数（2^53）。
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// 数字字符串转成整数文本。十进制写法直接按位处理，不经过 f64；
/// 只有指数写法才借助 f64，且超出精确范围时拒绝。
fn integer_string(s: &str) -> Result<String, TemplateError> {
    if let Ok(n) = s.parse::<i64>() {
        return Ok(n.to_string());
    }
    if let Ok(n) = s.parse::<u64>() {
        return Ok(n.to_string());
    }
    if let Some((int_text, frac)) = split_decimal(s) {
        if frac.bytes().any(|b| b != b'0') {
            return Err(TemplateError::invalid(
                "?d",
                format!("value {s:?} has a fractional part"),
            ));
        }
        return Ok(int_text);
    }
    match parse_number(s) {
        Some(f) if f.abs() <= MAX_EXACT_F64 => integral_text(f),
        Some(_) => Err(TemplateError::invalid(
            "?d",
            format!("value {s:?} cannot be converted to an integer exactly"),
        )),
        None => Err(TemplateError::invalid(
            "?d",
            format!("non-numeric string {s:?}"),
        )),
    }
}

/// 拆分 `[+-]digits[.digits]`，返回规范化的整数部分与小数位；其他写法返回 `None`。
fn split_decimal(s: &str) -> Option<(String, &str)> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (int_part, frac) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac.is_empty() {
        return None;
    }
    let all_digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac) {
        return None;
    }

    let digits = int_part.trim_start_matches('0');
    if digits.is_empty() {
        return Some(("0".to_string(), frac));
    }
    let mut text = String::with_capacity(digits.len() + 1);
    if negative {
        text.push('-');
    }
    text.push_str(digits);
    Some((text, frac))
}

fn integral_text(f: f64) -> Result<String, TemplateError> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(TemplateError::invalid(
            "?d",
            format!("value {f} has a fractional part"),
        ));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    Ok(format!("{f:.0}"))
}

/// f64 的 `Display` 不会输出指数形式。
fn decimal_text(f: f64) -> Result<String, TemplateError> {
    if !f.is_finite() {
        return Err(TemplateError::invalid("?f", format!("non-finite value {f}")));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    Ok(f.to_string())
}

fn write_array(out: &mut String, arg: Arg, ctx: FormatContext<'_>) -> Result<(), TemplateError> {
    match arg {
        Arg::List(items) => {
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_any(out, item, ctx)?;
            }
        }
        Arg::Map(entries) => {
            for (i, (name, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&quote_identifier(&name));
                out.push_str(" = ");
                write_any(out, value, ctx)?;
            }
        }
        other => {
            return Err(TemplateError::invalid(
                "?a",
                format!("expected a list or map, got {}", other.kind_name()),
            ));
        }
    }
    Ok(())
}

fn write_identifiers(out: &mut String, arg: Arg) -> Result<(), TemplateError> {
    match arg {
        Arg::List(items) => {
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&quote_identifier(&identifier_name(item)?));
            }
        }
        other => out.push_str(&quote_identifier(&identifier_name(other)?)),
    }
    Ok(())
}

fn identifier_name(arg: Arg) -> Result<String, TemplateError> {
    match scalar(arg, Marker::Identifier)? {
        SqlValue::String(s) => Ok(s.into_owned()),
        other => Err(TemplateError::invalid(
            "?#",
            format!("expected a name, got {}", other.kind_name()),
        )),
    }
}

fn write_bytes(out: &mut String, data: &[u8], flavor: Flavor) {
    match flavor {
        Flavor::ClickHouse => {
            out.push_str("unhex('");
            push_hex(out, data);
            out.push_str("')");
        }
        Flavor::MySQL | Flavor::SQLite | Flavor::Doris => {
            out.push_str("X'");
            push_hex(out, data);
            out.push('\'');
        }
    }
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

fn write_datetime(out: &mut String, v: &SqlDateTime, flavor: Flavor) -> Result<(), TemplateError> {
    let text = match flavor {
        Flavor::SQLite => {
            // 四舍五入到毫秒
            let dt = v.dt + time::Duration::microseconds(500);
            dt.format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
            ))
        }
        Flavor::MySQL | Flavor::ClickHouse | Flavor::Doris => {
            // 四舍五入到微秒
            let dt = v.dt + time::Duration::nanoseconds(500);
            dt.format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
            ))
        }
    }
    .map_err(|e| TemplateError::invalid("?", format!("datetime format failed: {e}")))?;

    out.push('\'');
    out.push_str(&text);
    out.push('\'');
    Ok(())
}
