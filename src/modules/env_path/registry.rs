use super::{PathScope, PathStore};
use crate::modules::common::error::UninstallerError;
use winreg::enums::*;
use winreg::{RegKey, RegValue};

const MACHINE_ENVIRONMENT: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";
const USER_ENVIRONMENT: &str = "Environment";
const PATH_VALUE: &str = "Path";

/// 注册表中的 PATH (HKLM 或 HKCU)
pub struct RegistryPathStore {
    scope: PathScope,
}

impl RegistryPathStore {
    pub fn new(scope: PathScope) -> Self {
        Self { scope }
    }

    fn open(&self, access: u32) -> Result<RegKey, UninstallerError> {
        let (root, subkey) = match self.scope {
            PathScope::Machine => (HKEY_LOCAL_MACHINE, MACHINE_ENVIRONMENT),
            PathScope::User => (HKEY_CURRENT_USER, USER_ENVIRONMENT),
        };

        RegKey::predef(root)
            .open_subkey_with_flags(subkey, access)
            .map_err(|e| UninstallerError::Environment(format!("无法打开 {}: {}", subkey, e)))
    }
}

impl PathStore for RegistryPathStore {
    fn scope(&self) -> PathScope {
        self.scope
    }

    fn read(&self) -> Result<String, UninstallerError> {
        let key = self.open(KEY_READ)?;

        match key.get_value::<String, _>(PATH_VALUE) {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(UninstallerError::Environment(format!("读取 PATH 失败: {}", e))),
        }
    }

    fn write(&self, value: &str) -> Result<(), UninstallerError> {
        let key = self.open(KEY_READ | KEY_WRITE)?;

        // 保留原来的值类型, PATH 通常是 REG_EXPAND_SZ
        let vtype = key
            .get_raw_value(PATH_VALUE)
            .map(|raw| raw.vtype)
            .unwrap_or(REG_EXPAND_SZ);

        let raw = RegValue {
            bytes: encode_wide(value).into(),
            vtype,
        };

        key.set_raw_value(PATH_VALUE, &raw)
            .map_err(|e| UninstallerError::Environment(format!("写入 PATH 失败: {}", e)))?;

        broadcast_environment_change();
        Ok(())
    }
}

/// UTF-16LE 带结尾 NUL
fn encode_wide(value: &str) -> Vec<u8> {
    value
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(|unit| unit.to_le_bytes())
        .collect()
}

/// 通知资源管理器等进程重新读取环境变量
fn broadcast_environment_change() {
    use windows::core::w;
    use windows::Win32::Foundation::{LPARAM, WPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{
        SendMessageTimeoutW, HWND_BROADCAST, SMTO_ABORTIFHUNG, WM_SETTINGCHANGE,
    };

    let environment = w!("Environment");
    let mut result = 0usize;

    let sent = unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            WPARAM(0),
            LPARAM(environment.as_ptr() as isize),
            SMTO_ABORTIFHUNG,
            5000,
            Some(&mut result),
        )
    };

    if sent.0 == 0 {
        tracing::debug!("环境变量变更广播未送达所有窗口");
    }
}
