//! 防火墙规则清理 (netsh advfirewall)

use crate::modules::common::error::UninstallerError;
use crate::modules::common::process::ProcessRunner;

pub trait FirewallStore {
    /// 按显示名称查找规则
    fn rule_exists(&self, display_name: &str) -> Result<bool, UninstallerError>;

    fn remove_rule(&self, display_name: &str) -> Result<(), UninstallerError>;
}

/// 通过 netsh 操作 Windows 防火墙
pub struct NetshFirewall<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> NetshFirewall<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl FirewallStore for NetshFirewall<'_> {
    fn rule_exists(&self, display_name: &str) -> Result<bool, UninstallerError> {
        let name = format!("name={}", display_name);
        let output = self
            .runner
            .run("netsh", &["advfirewall", "firewall", "show", "rule", &name])
            .map_err(|e| UninstallerError::Firewall(e.to_string()))?;

        // 找不到规则时 netsh 返回 1 并输出 "No rules match"
        Ok(output.success())
    }

    fn remove_rule(&self, display_name: &str) -> Result<(), UninstallerError> {
        let name = format!("name={}", display_name);
        let output = self
            .runner
            .run("netsh", &["advfirewall", "firewall", "delete", "rule", &name])
            .map_err(|e| UninstallerError::Firewall(e.to_string()))?;

        if output.success() {
            tracing::info!("已删除防火墙规则: {}", display_name);
            Ok(())
        } else {
            Err(UninstallerError::Firewall(format!(
                "删除规则 {} 失败: {}",
                display_name,
                output.describe()
            )))
        }
    }
}
