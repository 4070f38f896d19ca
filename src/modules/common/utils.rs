use std::path::{Path, PathBuf};

/// 规范化路径（统一斜杠、合并连续反斜杠、去掉末尾反斜杠）
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;

    for (i, ch) in path.trim().replace('/', "\\").chars().enumerate() {
        if ch == '\\' {
            // UNC 前缀 \\server 保留开头的两个反斜杠
            if previous_was_separator && i > 1 {
                continue;
            }
            previous_was_separator = true;
        } else {
            previous_was_separator = false;
        }
        normalized.push(ch);
    }

    while normalized.len() > 3 && normalized.ends_with('\\') {
        normalized.pop();
    }

    normalized
}

/// 计算目录大小
pub fn calculate_dir_size(path: &Path) -> std::io::Result<u64> {
    if path.is_file() {
        return path.metadata().map(|m| m.len());
    }

    let mut size = 0u64;

    for entry in walkdir::WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            if let Ok(metadata) = entry.metadata() {
                size += metadata.len();
            }
        }
    }

    Ok(size)
}

/// 格式化文件大小
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Program Files 目录
pub fn program_files_dir() -> PathBuf {
    std::env::var_os("ProgramW6432")
        .or_else(|| std::env::var_os("ProgramFiles"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Program Files"))
}

/// 桌面目录: 当前用户桌面和公共桌面
pub fn desktop_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(desktop) = dirs::desktop_dir() {
        dirs.push(desktop);
    } else if let Some(home) = dirs::home_dir() {
        dirs.push(home.join("Desktop"));
    }

    if let Ok(public) = std::env::var("Public") {
        dirs.push(PathBuf::from(public).join("Desktop"));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn normalize_path_collapses_separators() {
        assert_eq!(normalize_path(r"C:\Program Files\\FastSearch\"), r"C:\Program Files\FastSearch");
        assert_eq!(normalize_path("C:/Program Files/FastSearch"), r"C:\Program Files\FastSearch");
        assert_eq!(normalize_path(r"C:\"), r"C:\");
    }

    #[test]
    fn normalize_path_keeps_unc_prefix() {
        assert_eq!(normalize_path(r"\\server\share\\dir"), r"\\server\share\dir");
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn calculate_dir_size_sums_nested_files() {
        let root = std::env::temp_dir().join(format!("fastsearch-size-test-{}", uuid::Uuid::new_v4()));
        let nested = root.join("bin");
        assert!(fs::create_dir_all(&nested).is_ok());
        assert!(fs::write(root.join("a.txt"), vec![0u8; 100]).is_ok());
        assert!(fs::write(nested.join("b.bin"), vec![0u8; 28]).is_ok());

        assert_eq!(calculate_dir_size(&root).unwrap(), 128);

        let _ = fs::remove_dir_all(&root);
    }
}
