use crate::modules::common::error::UninstallerError;
use crate::modules::common::utils;
use std::path::Path;

/// 关键系统路径黑名单 (前缀匹配), %SystemRoot% 另外加入
const CRITICAL_PATHS: &[&str] = &[
    r"C:\Windows",
    r"C:\ProgramData\Microsoft",
];

/// %SystemRoot% 下的关键子目录
const SYSTEM_SUBDIRS: &[&str] = &["System32", "SysWOW64", "WinSxS"];

/// 只禁止目录本身, 其子目录允许删除
const PROTECTED_ROOTS: &[&str] = &[
    r"C:\Program Files",
    r"C:\Program Files (x86)",
    r"C:\ProgramData",
    r"C:\Users",
];

/// 同样只禁止目录本身, 位置取自环境变量
const PROTECTED_ROOT_VARS: &[&str] = &["ProgramFiles", "ProgramFiles(x86)", "ProgramData", "Public"];

/// 删除安装目录前检查
pub fn pre_delete_check(path: &Path) -> Result<(), UninstallerError> {
    let raw = path.to_string_lossy();
    let normalized = utils::normalize_path(&raw);

    if normalized.is_empty() {
        return Err(UninstallerError::CriticalSystemItem("安装目录为空".to_string()));
    }

    if is_drive_root(&normalized) || path.parent().is_none() {
        return Err(UninstallerError::CriticalSystemItem(format!(
            "不能删除根目录: {}",
            normalized
        )));
    }

    if is_critical_path(&normalized) {
        return Err(UninstallerError::CriticalSystemItem(format!(
            "不能删除关键系统目录: {}",
            normalized
        )));
    }

    if is_protected_root(&normalized) {
        return Err(UninstallerError::CriticalSystemItem(format!(
            "不能删除公共目录本身: {}",
            normalized
        )));
    }

    Ok(())
}

fn is_drive_root(path: &str) -> bool {
    let bytes = path.as_bytes();
    matches!(bytes.len(), 2 | 3)
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'\\')
}

/// 检查是否为关键系统路径
fn is_critical_path(path: &str) -> bool {
    let system_root = std::env::var("SystemRoot")
        .or_else(|_| std::env::var("windir"))
        .ok();

    critical_paths(system_root.as_deref())
        .iter()
        .any(|critical| path_upper_matches(path, critical))
}

fn critical_paths(system_root: Option<&str>) -> Vec<String> {
    let mut paths: Vec<String> = CRITICAL_PATHS.iter().map(|p| p.to_string()).collect();

    let mut roots = vec![r"C:\Windows".to_string()];
    if let Some(root) = system_root.map(utils::normalize_path).filter(|r| !r.is_empty()) {
        paths.push(root.clone());
        roots.push(root);
    }

    for root in roots {
        for sub in SYSTEM_SUBDIRS {
            paths.push(format!("{}\\{}", root, sub));
        }
    }

    paths
}

/// 路径等于 critical 或位于其下 (不区分大小写)
fn path_upper_matches(path: &str, critical: &str) -> bool {
    let path_upper = path.to_uppercase();
    let critical = critical.to_uppercase();
    path_upper == critical || path_upper.starts_with(&format!("{}\\", critical))
}

fn is_protected_root(path: &str) -> bool {
    let path_upper = path.to_uppercase();

    protected_roots()
        .iter()
        .any(|root| utils::normalize_path(root).to_uppercase() == path_upper)
}

fn protected_roots() -> Vec<String> {
    let mut roots: Vec<String> = PROTECTED_ROOTS.iter().map(|p| p.to_string()).collect();
    roots.push(utils::program_files_dir().to_string_lossy().to_string());

    for var in PROTECTED_ROOT_VARS {
        if let Ok(value) = std::env::var(var) {
            roots.push(value);
        }
    }

    // 用户目录本身, 以及它所在的 Users 目录
    if let Some(home) = dirs::home_dir() {
        if let Some(parent) = home.parent() {
            roots.push(parent.to_string_lossy().to_string());
        }
        roots.push(home.to_string_lossy().to_string());
    }

    roots
}
