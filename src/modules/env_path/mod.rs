//! PATH 环境变量清理
//!
//! 只删除与安装目录完全相同的分段, 其余分段原样保留 (包括空分段和顺序)。

#[cfg(windows)]
mod registry;

use crate::modules::common::error::UninstallerError;
use serde::{Deserialize, Serialize};

#[cfg(windows)]
pub use self::registry::RegistryPathStore;

/// PATH 所在的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathScope {
    Machine,
    User,
}

impl std::fmt::Display for PathScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathScope::Machine => write!(f, "系统"),
            PathScope::User => write!(f, "用户"),
        }
    }
}

pub trait PathStore {
    fn scope(&self) -> PathScope;

    fn read(&self) -> Result<String, UninstallerError>;

    fn write(&self, value: &str) -> Result<(), UninstallerError>;
}

/// 从 `;` 分隔的列表中删除所有与 `entry` 完全相同的分段
///
/// 没有匹配时返回 `None`, 调用方据此决定是否需要写回。
pub fn remove_path_entry(value: &str, entry: &str) -> Option<String> {
    if entry.is_empty() {
        return None;
    }

    let segments: Vec<&str> = value.split(';').collect();
    let kept: Vec<&str> = segments.iter().copied().filter(|s| *s != entry).collect();

    if kept.len() == segments.len() {
        None
    } else {
        Some(kept.join(";"))
    }
}

/// PATH 中是否包含该分段
pub fn contains_entry(value: &str, entry: &str) -> bool {
    !entry.is_empty() && value.split(';').any(|s| s == entry)
}

/// 清理一个作用域的 PATH, 返回是否写回了新值
pub fn cleanup_path(store: &dyn PathStore, entry: &str) -> Result<bool, UninstallerError> {
    let current = store.read()?;

    match remove_path_entry(&current, entry) {
        Some(updated) => {
            store.write(&updated)?;
            tracing::info!("已从{} PATH 中删除: {}", store.scope(), entry);
            Ok(true)
        }
        None => {
            tracing::debug!("{} PATH 中没有 {}", store.scope(), entry);
            Ok(false)
        }
    }
}

/// 当前平台的 PATH 存储
#[cfg(windows)]
pub fn system_path_store(scope: PathScope) -> Box<dyn PathStore> {
    Box::new(RegistryPathStore::new(scope))
}

#[cfg(not(windows))]
pub fn system_path_store(scope: PathScope) -> Box<dyn PathStore> {
    Box::new(UnsupportedPathStore(scope))
}

#[cfg(not(windows))]
struct UnsupportedPathStore(PathScope);

#[cfg(not(windows))]
impl PathStore for UnsupportedPathStore {
    fn scope(&self) -> PathScope {
        self.0
    }

    fn read(&self) -> Result<String, UninstallerError> {
        Err(UninstallerError::Unsupported("注册表环境变量仅在 Windows 上可用".to_string()))
    }

    fn write(&self, _value: &str) -> Result<(), UninstallerError> {
        Err(UninstallerError::Unsupported("注册表环境变量仅在 Windows 上可用".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct MemoryPath {
        value: RefCell<String>,
        writes: Cell<usize>,
    }

    impl MemoryPath {
        fn new(value: &str) -> Self {
            Self {
                value: RefCell::new(value.to_string()),
                writes: Cell::new(0),
            }
        }
    }

    impl PathStore for MemoryPath {
        fn scope(&self) -> PathScope {
            PathScope::Machine
        }

        fn read(&self) -> Result<String, UninstallerError> {
            Ok(self.value.borrow().clone())
        }

        fn write(&self, value: &str) -> Result<(), UninstallerError> {
            self.writes.set(self.writes.get() + 1);
            *self.value.borrow_mut() = value.to_string();
            Ok(())
        }
    }

    const DIR: &str = r"C:\Program Files\FastSearch";

    #[test]
    fn removes_only_exact_segment() {
        let path = r"C:\Windows;C:\Program Files\FastSearch;C:\Program Files\FastSearch\bin";
        assert_eq!(
            remove_path_entry(path, DIR),
            Some(r"C:\Windows;C:\Program Files\FastSearch\bin".to_string())
        );
    }

    #[test]
    fn removes_duplicates_and_keeps_order() {
        let path = r"C:\Program Files\FastSearch;C:\Windows;;C:\Program Files\FastSearch;C:\Tools";
        assert_eq!(
            remove_path_entry(path, DIR),
            Some(r"C:\Windows;;C:\Tools".to_string())
        );
    }

    #[test]
    fn no_match_returns_none() {
        assert_eq!(remove_path_entry(r"C:\Windows;C:\Tools", DIR), None);
        assert_eq!(remove_path_entry(r"C:\Windows", ""), None);
        // 大小写或末尾反斜杠不同都不算同一分段
        assert_eq!(remove_path_entry(r"c:\program files\fastsearch", DIR), None);
        assert_eq!(remove_path_entry(r"C:\Program Files\FastSearch\", DIR), None);
    }

    #[test]
    fn cleanup_is_idempotent() {
        let store = MemoryPath::new(r"C:\Windows;C:\Program Files\FastSearch");

        assert!(cleanup_path(&store, DIR).unwrap());
        let after_first = store.value.borrow().clone();
        assert_eq!(after_first, r"C:\Windows");

        assert!(!cleanup_path(&store, DIR).unwrap());
        assert_eq!(*store.value.borrow(), after_first);
        assert_eq!(store.writes.get(), 1);
    }

    #[test]
    fn contains_entry_matches_segments() {
        assert!(contains_entry(r"C:\Windows;C:\Program Files\FastSearch", DIR));
        assert!(!contains_entry(r"C:\Program Files\FastSearch\bin", DIR));
    }
}
