//! 宏集合：用不定长参数构造 `Vec<Arg>`，无需逐个调用 `.into()`。

/// 把任意可转换为 [`Arg`](crate::Arg) 的表达式收集成 `Vec<Arg>`。
///
/// ```
/// use halo_space::{args, build_query, skip};
///
/// let sql = build_query("SELECT * FROM t WHERE a = ?d {AND b = ?}", args![1, skip()]).unwrap();
/// assert_eq!(sql, "SELECT * FROM t WHERE a = 1 ");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Arg::from($value)),+]
    };
}
