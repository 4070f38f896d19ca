//! 管理员权限检查

pub trait PrivilegeProbe {
    fn is_elevated(&self) -> bool;
}

/// 检查当前进程令牌是否已提升
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenElevationProbe;

impl PrivilegeProbe for TokenElevationProbe {
    fn is_elevated(&self) -> bool {
        is_admin()
    }
}

#[cfg(windows)]
fn is_admin() -> bool {
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::Security::{GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY};
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    unsafe {
        let mut token = HANDLE::default();
        if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token).is_err() {
            return false;
        }

        let mut elevation = TOKEN_ELEVATION::default();
        let mut size = std::mem::size_of::<TOKEN_ELEVATION>() as u32;

        let result = GetTokenInformation(
            token,
            TokenElevation,
            Some(&mut elevation as *mut _ as *mut _),
            size,
            &mut size,
        );

        let _ = CloseHandle(token);

        result.is_ok() && elevation.TokenIsElevated != 0
    }
}

#[cfg(not(windows))]
fn is_admin() -> bool {
    // 服务、防火墙和注册表操作只在 Windows 上存在
    tracing::debug!("非 Windows 平台, 视为无管理员权限");
    false
}
