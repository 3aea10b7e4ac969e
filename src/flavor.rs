//! SQL Flavor（方言）：决定字符串转义方式以及二进制、时间字面量的写法。
//!
//! 所有支持的方言都接受反引号标识符，`?#` / `?a` 的列名输出与方言无关。

use crate::escape::{Escaper, escape_mysql, escape_standard};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 模板引擎支持的方言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    SQLite,
    ClickHouse,
    Doris,
}

/// 进程级默认方言，存放 `Flavor::ALL` 中的下标；`QueryEngine::new` / `build_query` 读取它。
static DEFAULT_FLAVOR: AtomicU8 = AtomicU8::new(0);
/// 串行化所有临时修改默认方言的作用域。
static DEFAULT_FLAVOR_SCOPE: Mutex<()> = Mutex::new(());

impl Flavor {
    /// 全部方言，顺序即 `DEFAULT_FLAVOR` 中保存的下标。
    pub const ALL: [Flavor; 4] = [Self::MySQL, Self::SQLite, Self::ClickHouse, Self::Doris];

    fn index(self) -> u8 {
        match self {
            Self::MySQL => 0,
            Self::SQLite => 1,
            Self::ClickHouse => 2,
            Self::Doris => 3,
        }
    }

    fn from_index(i: u8) -> Self {
        Self::ALL.get(usize::from(i)).copied().unwrap_or_default()
    }

    /// 是否使用反斜杠转义（否则使用标准 SQL 的 `''`）。
    pub fn uses_backslash_escapes(self) -> bool {
        !matches!(self, Self::SQLite)
    }
}

/// 当前默认方言。
pub fn default_flavor() -> Flavor {
    Flavor::from_index(DEFAULT_FLAVOR.load(Ordering::Relaxed))
}

/// 替换默认方言并返回之前的值。
pub fn set_default_flavor(flavor: Flavor) -> Flavor {
    Flavor::from_index(DEFAULT_FLAVOR.swap(flavor.index(), Ordering::Relaxed))
}

/// `set_default_flavor_scoped` 返回的作用域；drop 时恢复之前的默认方言并释放锁。
pub struct DefaultFlavorScope {
    previous: Flavor,
    _serial: MutexGuard<'static, ()>,
}

impl Drop for DefaultFlavorScope {
    fn drop(&mut self) {
        set_default_flavor(self.previous);
    }
}

/// 在作用域内把默认方言改为 `flavor`。同一时刻只允许一个作用域存在，
/// 依赖默认方言的测试因此不会互相覆盖。
pub fn set_default_flavor_scoped(flavor: Flavor) -> DefaultFlavorScope {
    let serial = DEFAULT_FLAVOR_SCOPE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    DefaultFlavorScope {
        previous: set_default_flavor(flavor),
        _serial: serial,
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::SQLite => "SQLite",
            Self::ClickHouse => "ClickHouse",
            Self::Doris => "Doris",
        };
        f.write_str(s)
    }
}

impl Escaper for Flavor {
    fn escape_string(&self, raw: &str) -> String {
        if self.uses_backslash_escapes() {
            escape_mysql(raw)
        } else {
            escape_standard(raw)
        }
    }
}
