//! 只读检查: 列出还残留哪些卸载目标, 不做任何修改

use super::models::UninstallConfig;
use crate::modules::common::utils;
use crate::modules::env_path::{self, PathScope, PathStore};
use crate::modules::firewall::FirewallStore;
use crate::modules::service::{ServiceControl, ServiceState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathInspection {
    pub scope: PathScope,
    pub contains_entry: Option<bool>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectReport {
    pub service_name: String,
    pub service_state: Option<ServiceState>,
    pub service_error: Option<String>,
    pub firewall_rule: String,
    pub firewall_rule_present: Option<bool>,
    pub path_entries: Vec<PathInspection>,
    /// 存在的快捷方式
    pub shortcuts: Vec<String>,
    pub install_dir: String,
    pub install_dir_exists: bool,
    pub install_dir_size: Option<u64>,
    pub helper: Option<String>,
    pub payload_script: Option<String>,
}

impl InspectReport {
    /// 是否还有需要卸载的内容
    pub fn has_leftovers(&self) -> bool {
        self.service_state.map(|s| s.is_present()).unwrap_or(false)
            || self.firewall_rule_present.unwrap_or(false)
            || self.path_entries.iter().any(|p| p.contains_entry.unwrap_or(false))
            || !self.shortcuts.is_empty()
            || self.install_dir_exists
    }
}

pub fn inspect(
    config: &UninstallConfig,
    services: &dyn ServiceControl,
    firewall: &dyn FirewallStore,
    path_stores: &[&dyn PathStore],
) -> InspectReport {
    let (service_state, service_error) = match services.query(&config.service_name) {
        Ok(state) => (Some(state), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let firewall_rule_present = match firewall.rule_exists(&config.firewall_rule) {
        Ok(present) => Some(present),
        Err(e) => {
            tracing::warn!("查询防火墙规则失败: {}", e);
            None
        }
    };

    let entry = config.install_dir_entry();
    let path_entries = path_stores
        .iter()
        .map(|store| match store.read() {
            Ok(value) => PathInspection {
                scope: store.scope(),
                contains_entry: Some(env_path::contains_entry(&value, &entry)),
                error: None,
            },
            Err(e) => PathInspection {
                scope: store.scope(),
                contains_entry: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let shortcuts = config
        .shortcuts
        .iter()
        .filter(|p| p.exists())
        .map(|p| p.display().to_string())
        .collect();

    let install_dir_exists = config.install_dir.is_dir();
    let install_dir_size = if install_dir_exists {
        utils::calculate_dir_size(&config.install_dir).ok()
    } else {
        None
    };

    let helper = config
        .helper_candidates
        .iter()
        .find(|p| p.is_file())
        .map(|p| p.display().to_string());

    let payload_script = Some(&config.payload_script)
        .filter(|p| p.is_file())
        .map(|p| p.display().to_string());

    InspectReport {
        service_name: config.service_name.clone(),
        service_state,
        service_error,
        firewall_rule: config.firewall_rule.clone(),
        firewall_rule_present,
        path_entries,
        shortcuts,
        install_dir: entry,
        install_dir_exists,
        install_dir_size,
        helper,
        payload_script,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::common::error::UninstallerError;
    use std::fs;
    use std::time::Duration;

    struct StaticServices(ServiceState);

    impl ServiceControl for StaticServices {
        fn query(&self, _name: &str) -> Result<ServiceState, UninstallerError> {
            Ok(self.0)
        }

        fn stop(&self, _name: &str, _timeout: Duration) -> Result<(), UninstallerError> {
            panic!("inspect must not stop services");
        }
    }

    struct BrokenFirewall;

    impl FirewallStore for BrokenFirewall {
        fn rule_exists(&self, _display_name: &str) -> Result<bool, UninstallerError> {
            Err(UninstallerError::Firewall("netsh missing".to_string()))
        }

        fn remove_rule(&self, _display_name: &str) -> Result<(), UninstallerError> {
            panic!("inspect must not remove rules");
        }
    }

    struct FixedPath(String);

    impl PathStore for FixedPath {
        fn scope(&self) -> PathScope {
            PathScope::User
        }

        fn read(&self) -> Result<String, UninstallerError> {
            Ok(self.0.clone())
        }

        fn write(&self, _value: &str) -> Result<(), UninstallerError> {
            panic!("inspect must not write PATH");
        }
    }

    #[test]
    fn reports_leftovers_without_changing_anything() {
        let root = std::env::temp_dir().join(format!("fastsearch-inspect-test-{}", uuid::Uuid::new_v4()));
        let install_dir = root.join("FastSearch");
        assert!(fs::create_dir_all(&install_dir).is_ok());
        assert!(fs::write(install_dir.join("nssm.exe"), vec![0u8; 10]).is_ok());

        let config = UninstallConfig::new(install_dir.clone(), "FastSearchService")
            .with_shortcuts(vec![root.join("FastSearch.lnk")]);
        let path = FixedPath(format!("C:\\Windows;{}", install_dir.to_string_lossy()));

        let report = inspect(
            &config,
            &StaticServices(ServiceState::Running),
            &BrokenFirewall,
            &[&path],
        );

        assert_eq!(report.service_state, Some(ServiceState::Running));
        assert_eq!(report.firewall_rule_present, None);
        assert_eq!(report.path_entries[0].contains_entry, Some(true));
        assert!(report.shortcuts.is_empty());
        assert!(report.install_dir_exists);
        assert_eq!(report.install_dir_size, Some(10));
        assert!(report.helper.is_some());
        assert!(report.payload_script.is_none());
        assert!(report.has_leftovers());
        assert!(install_dir.exists());

        let _ = fs::remove_dir_all(&root);
    }
}
