//! 服务查询、停止与删除
//!
//! 服务状态由系统服务管理器持有, 这里只做查询和请求, 不缓存状态。

pub mod strategies;

#[cfg(windows)]
mod scm;

use crate::modules::common::error::UninstallerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(windows)]
pub use self::scm::WindowsServiceControl;

/// 服务当前状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    /// 未注册
    Absent,
    Stopped,
    Running,
    /// 正在启动或停止
    Pending,
    Paused,
}

impl ServiceState {
    pub fn is_present(self) -> bool {
        self != ServiceState::Absent
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceState::Absent => write!(f, "未安装"),
            ServiceState::Stopped => write!(f, "已停止"),
            ServiceState::Running => write!(f, "运行中"),
            ServiceState::Pending => write!(f, "状态切换中"),
            ServiceState::Paused => write!(f, "已暂停"),
        }
    }
}

pub trait ServiceControl {
    fn query(&self, name: &str) -> Result<ServiceState, UninstallerError>;

    /// 请求停止并等待服务进入 Stopped, 超时返回错误
    fn stop(&self, name: &str, timeout: Duration) -> Result<(), UninstallerError>;
}

/// 当前平台默认的服务控制实现
#[cfg(windows)]
pub fn system_service_control() -> Box<dyn ServiceControl> {
    Box::new(WindowsServiceControl)
}

#[cfg(not(windows))]
pub fn system_service_control() -> Box<dyn ServiceControl> {
    Box::new(UnsupportedServiceControl)
}

#[cfg(not(windows))]
struct UnsupportedServiceControl;

#[cfg(not(windows))]
impl ServiceControl for UnsupportedServiceControl {
    fn query(&self, _name: &str) -> Result<ServiceState, UninstallerError> {
        Err(UninstallerError::Unsupported("服务管理器仅在 Windows 上可用".to_string()))
    }

    fn stop(&self, _name: &str, _timeout: Duration) -> Result<(), UninstallerError> {
        Err(UninstallerError::Unsupported("服务管理器仅在 Windows 上可用".to_string()))
    }
}
