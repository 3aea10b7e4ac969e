//! 模板参数与构造辅助函数。

use crate::value::SqlValue;
use crate::valuer::SqlValuer;
use std::collections::{BTreeMap, HashMap};

/// `build_query` 的位置参数。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
    /// `?a` 的有序列表形式，也是 `?#` 的多列名形式。
    List(Vec<Arg>),
    /// `?a` 的列名 -> 值形式；键唯一且保持插入顺序。
    Map(Vec<(String, Arg)>),
    /// 跳过标记：让消费它的 `{...}` 片段整体变为空串。
    Skip,
}

impl Arg {
    /// 用于错误信息的类型名。
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(v) => v.kind_name(),
            Self::Valuer(_) => "valuer",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(_) => f.write_str("Valuer(..)"),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Skip => f.write_str("Skip"),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Valuer(_), _) | (_, Self::Valuer(_)) => false,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Skip, Self::Skip) => true,
            _ => false,
        }
    }
}

/// 生成跳过标记，放在某个 `{...}` 片段会消费的位置上即可取消该片段。
pub fn skip() -> Arg {
    Arg::Skip
}

/// List：把若干值收集为 `?a` / `?#` 可用的列表参数。
pub fn list<T: Into<Arg>>(values: impl IntoIterator<Item = T>) -> Arg {
    Arg::List(values.into_iter().map(Into::into).collect())
}

/// Map：按给定顺序构造 `列名 -> 值` 参数；重复的列名保留首次出现的位置、使用最后一次的值。
pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Arg
where
    K: Into<String>,
    V: Into<Arg>,
{
    let mut out: Vec<(String, Arg)> = Vec::new();
    for (k, v) in entries {
        let k = k.into();
        let v = v.into();
        match out.iter_mut().find(|(name, _)| *name == k) {
            Some(slot) => slot.1 = v,
            None => out.push((k, v)),
        }
    }
    Arg::Map(out)
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    SqlValue::from(v).into()
                }
            }
        )*
    };
}

impl_from_scalar!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    time::OffsetDateTime
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        SqlValue::from_option(v).into()
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Arg>> From<BTreeMap<K, V>> for Arg {
    fn from(v: BTreeMap<K, V>) -> Self {
        map(v)
    }
}

/// HashMap 的迭代顺序不稳定，这里先按列名排序。
impl<K: Into<String>, V: Into<Arg>> From<HashMap<K, V>> for Arg {
    fn from(v: HashMap<K, V>) -> Self {
        let mut entries: Vec<(String, Arg)> =
            v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Arg::Map(entries)
    }
}
