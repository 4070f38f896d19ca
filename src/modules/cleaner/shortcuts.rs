use super::filesystem;
use crate::modules::common::error::UninstallerError;
use std::path::{Path, PathBuf};

/// 快捷方式删除结果
#[derive(Debug, Default)]
pub struct ShortcutCleanup {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// 删除存在的快捷方式, 单个失败不影响其余
pub fn delete_shortcuts(paths: &[PathBuf]) -> ShortcutCleanup {
    let mut cleanup = ShortcutCleanup::default();

    for path in paths {
        match delete_shortcut(path) {
            Ok(true) => cleanup.removed.push(path.clone()),
            Ok(false) => {}
            Err(e) => {
                tracing::error!("删除快捷方式失败 {}: {}", path.display(), e);
                cleanup.failed.push((path.clone(), e.to_string()));
            }
        }
    }

    cleanup
}

fn delete_shortcut(path: &Path) -> Result<bool, UninstallerError> {
    // 只处理 .lnk 文件
    if path.extension().map(|e| !e.eq_ignore_ascii_case("lnk")).unwrap_or(true) {
        return Err(UninstallerError::Other(format!("不是快捷方式: {}", path.display())));
    }

    filesystem::delete_file(path)
}
