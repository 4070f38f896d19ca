use super::safety;
use crate::modules::common::error::UninstallerError;
use crate::modules::common::utils;
use std::path::Path;

/// 递归删除安装目录, 返回释放的字节数
pub fn delete_install_dir(path: &Path) -> Result<u64, UninstallerError> {
    safety::pre_delete_check(path)?;

    if !path.exists() {
        return Ok(0);
    }

    let bytes_freed = utils::calculate_dir_size(path).unwrap_or(0);

    match std::fs::remove_dir_all(path) {
        Ok(_) => {
            tracing::info!("已删除目录: {} ({})", path.display(), utils::format_size(bytes_freed));
            Ok(bytes_freed)
        }
        Err(e) => {
            tracing::error!("删除目录失败 {}: {}", path.display(), e);
            Err(UninstallerError::FileSystem(e))
        }
    }
}

/// 删除单个文件, 文件不存在时返回 false
pub fn delete_file(path: &Path) -> Result<bool, UninstallerError> {
    if !path.exists() {
        return Ok(false);
    }

    std::fs::remove_file(path)?;
    tracing::info!("已删除: {}", path.display());
    Ok(true)
}
