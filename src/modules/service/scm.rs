use super::{ServiceControl, ServiceState};
use crate::modules::common::error::UninstallerError;
use std::thread;
use std::time::{Duration, Instant};
use windows_service::service::{ServiceAccess, ServiceState as NativeState};
use windows_service::service_manager::{ServiceManager, ServiceManagerAccess};

const ERROR_SERVICE_DOES_NOT_EXIST: i32 = 1060;
const ERROR_SERVICE_NOT_ACTIVE: i32 = 1062;
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 基于 Service Control Manager 的实现
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsServiceControl;

impl WindowsServiceControl {
    fn manager() -> Result<ServiceManager, UninstallerError> {
        ServiceManager::local_computer(None::<&str>, ServiceManagerAccess::CONNECT)
            .map_err(|e| UninstallerError::Service(format!("无法连接服务管理器: {}", e)))
    }
}

impl ServiceControl for WindowsServiceControl {
    fn query(&self, name: &str) -> Result<ServiceState, UninstallerError> {
        let manager = Self::manager()?;

        let service = match manager.open_service(name, ServiceAccess::QUERY_STATUS) {
            Ok(service) => service,
            Err(e) if os_error(&e) == Some(ERROR_SERVICE_DOES_NOT_EXIST) => {
                return Ok(ServiceState::Absent);
            }
            Err(e) => {
                return Err(UninstallerError::Service(format!("无法打开服务 {}: {}", name, e)));
            }
        };

        let status = service
            .query_status()
            .map_err(|e| UninstallerError::Service(format!("查询服务 {} 失败: {}", name, e)))?;

        Ok(match status.current_state {
            NativeState::Stopped => ServiceState::Stopped,
            NativeState::Running => ServiceState::Running,
            NativeState::Paused => ServiceState::Paused,
            NativeState::StartPending
            | NativeState::StopPending
            | NativeState::ContinuePending
            | NativeState::PausePending => ServiceState::Pending,
        })
    }

    fn stop(&self, name: &str, timeout: Duration) -> Result<(), UninstallerError> {
        let manager = Self::manager()?;
        let service = manager
            .open_service(name, ServiceAccess::QUERY_STATUS | ServiceAccess::STOP)
            .map_err(|e| UninstallerError::Service(format!("无法打开服务 {}: {}", name, e)))?;

        if let Err(e) = service.stop() {
            // 服务未运行时 SCM 返回 1062, 不算失败
            if os_error(&e) != Some(ERROR_SERVICE_NOT_ACTIVE) {
                return Err(UninstallerError::Service(format!("停止服务 {} 失败: {}", name, e)));
            }
        }

        let deadline = Instant::now() + timeout;
        loop {
            let status = service
                .query_status()
                .map_err(|e| UninstallerError::Service(format!("查询服务 {} 失败: {}", name, e)))?;

            if status.current_state == NativeState::Stopped {
                tracing::info!("服务 {} 已停止", name);
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(UninstallerError::Service(format!(
                    "服务 {} 在 {} 秒内未停止 (当前状态 {:?})",
                    name,
                    timeout.as_secs(),
                    status.current_state
                )));
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn os_error(error: &windows_service::Error) -> Option<i32> {
    match error {
        windows_service::Error::Winapi(io) => io.raw_os_error(),
        _ => None,
    }
}
