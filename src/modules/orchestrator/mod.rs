//! 卸载流程编排
//!
//! 步骤严格按顺序执行: 权限检查 → 服务 → 防火墙规则 → PATH → 快捷方式 →
//! 安装目录 → 辅助程序。只有权限不足和操作者中止是致命的, 其余失败都记为
//! 警告后继续下一步。

pub mod inspect;
pub mod models;

use crate::modules::cleaner::models::{RemovalOutcome, Step, StepReport};
use crate::modules::cleaner::{filesystem, shortcuts};
use crate::modules::common::error::UninstallerError;
use crate::modules::common::prompt::Confirm;
use crate::modules::env_path::{self, PathStore};
use crate::modules::firewall::FirewallStore;
use crate::modules::privilege::PrivilegeProbe;
use crate::modules::reporter::models::UninstallSummary;
use crate::modules::service::strategies::{self, RemovalStrategy};
use crate::modules::service::{ServiceControl, ServiceState};
use models::UninstallConfig;
use std::path::PathBuf;

/// 编排器依赖的外部资源
pub struct UninstallDeps<'a> {
    pub privilege: &'a dyn PrivilegeProbe,
    pub services: &'a dyn ServiceControl,
    /// 按优先级排列的删除方式
    pub strategies: Vec<Box<dyn RemovalStrategy + 'a>>,
    pub firewall: &'a dyn FirewallStore,
    pub path_stores: Vec<&'a dyn PathStore>,
    pub prompt: &'a dyn Confirm,
    /// 每完成一步调用一次
    pub on_step: Option<&'a dyn Fn(&StepReport)>,
}

pub struct Orchestrator<'a> {
    config: &'a UninstallConfig,
    deps: UninstallDeps<'a>,
}

struct ServicePhase {
    report: StepReport,
    /// 后备链用过的辅助程序
    leftovers: Vec<PathBuf>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a UninstallConfig, deps: UninstallDeps<'a>) -> Self {
        Self { config, deps }
    }

    pub fn run(&self) -> Result<UninstallSummary, UninstallerError> {
        if !self.deps.privilege.is_elevated() {
            return Err(UninstallerError::PermissionDenied(
                "需要以管理员身份运行".to_string(),
            ));
        }

        tracing::info!(
            "开始卸载: 服务 {}, 安装目录 {}",
            self.config.service_name,
            self.config.install_dir.display()
        );

        let mut summary = UninstallSummary::new(
            self.config.service_name.clone(),
            self.config.install_dir_entry(),
        );

        let service = self.remove_service()?;
        self.record(&mut summary, service.report);

        let firewall = self.remove_firewall_rule();
        self.record(&mut summary, firewall);

        for report in self.cleanup_path() {
            self.record(&mut summary, report);
        }

        let shortcut = self.remove_shortcuts();
        self.record(&mut summary, shortcut);

        let directory = self.remove_install_dir();
        self.record(&mut summary, directory);

        let helper = self.cleanup_helpers(&service.leftovers);
        self.record(&mut summary, helper);

        tracing::info!("卸载结束, {} 个警告", summary.warning_count());
        Ok(summary)
    }

    fn record(&self, summary: &mut UninstallSummary, report: StepReport) {
        if report.outcome == RemovalOutcome::Warning {
            tracing::warn!(
                "[{}] {}: {}",
                report.step,
                report.detail,
                report.error.as_deref().unwrap_or("")
            );
        }

        if let Some(on_step) = self.deps.on_step {
            on_step(&report);
        }

        summary.push(report);
    }

    /// Present → Stopping → Removed, 或 Absent
    fn remove_service(&self) -> Result<ServicePhase, UninstallerError> {
        let name = &self.config.service_name;

        let state = match self.deps.services.query(name) {
            Ok(state) => state,
            Err(e) => {
                return Ok(ServicePhase {
                    report: StepReport::warning(Step::Service, format!("无法查询服务 {}", name), e),
                    leftovers: Vec::new(),
                });
            }
        };

        if state == ServiceState::Absent {
            tracing::info!("未找到服务 {}, 跳过", name);
            return Ok(ServicePhase {
                report: StepReport::skipped(Step::Service, format!("未找到服务 {}", name)),
                leftovers: Vec::new(),
            });
        }

        if state != ServiceState::Stopped {
            tracing::info!("正在停止服务 {} (当前: {})", name, state);

            if let Err(e) = self.deps.services.stop(name, self.config.stop_timeout) {
                tracing::warn!("停止服务 {} 失败: {}", name, e);

                let question = format!("停止服务 {} 失败, 仍然继续删除吗?", name);
                if !self.config.force && !self.deps.prompt.confirm(&question) {
                    return Err(UninstallerError::Aborted(format!(
                        "停止服务 {} 失败后操作者取消了卸载",
                        name
                    )));
                }
            }
        }

        let chain = strategies::run_chain(&self.deps.strategies, name);

        if !self.config.settle_delay.is_zero() {
            std::thread::sleep(self.config.settle_delay);
        }

        let report = match self.deps.services.query(name) {
            Ok(ServiceState::Absent) => StepReport::success(
                Step::Service,
                format!("已删除服务 {} (通过 {})", name, chain.removed_by.unwrap_or("未知方式")),
            ),
            Ok(state) => {
                let mut error = format!("当前状态: {}", state);
                if !chain.errors.is_empty() {
                    error = format!("{}; {}", error, chain.errors.join("; "));
                }
                StepReport::warning(
                    Step::Service,
                    format!("服务 {} 仍然存在, 需要手动处理", name),
                    error,
                )
            }
            Err(e) => StepReport::warning(Step::Service, format!("无法确认服务 {} 是否已删除", name), e),
        };

        Ok(ServicePhase {
            report,
            leftovers: chain.leftovers,
        })
    }

    fn remove_firewall_rule(&self) -> StepReport {
        let rule = &self.config.firewall_rule;

        match self.deps.firewall.rule_exists(rule) {
            Ok(false) => {
                tracing::debug!("未找到防火墙规则 {}", rule);
                StepReport::skipped(Step::Firewall, format!("未找到防火墙规则 {}", rule))
            }
            Ok(true) => match self.deps.firewall.remove_rule(rule) {
                Ok(()) => StepReport::success(Step::Firewall, format!("已删除防火墙规则 {}", rule)),
                Err(e) => StepReport::warning(Step::Firewall, format!("删除防火墙规则 {} 失败", rule), e),
            },
            Err(e) => StepReport::warning(Step::Firewall, format!("查询防火墙规则 {} 失败", rule), e),
        }
    }

    fn cleanup_path(&self) -> Vec<StepReport> {
        let entry = self.config.install_dir_entry();

        self.deps
            .path_stores
            .iter()
            .map(|store| match env_path::cleanup_path(*store, &entry) {
                Ok(true) => StepReport::success(
                    Step::PathCleanup,
                    format!("已从{} PATH 中删除 {}", store.scope(), entry),
                ),
                Ok(false) => StepReport::skipped(
                    Step::PathCleanup,
                    format!("{} PATH 中没有 {}", store.scope(), entry),
                ),
                Err(e) => StepReport::warning(
                    Step::PathCleanup,
                    format!("更新{} PATH 失败", store.scope()),
                    e,
                ),
            })
            .collect()
    }

    fn remove_shortcuts(&self) -> StepReport {
        let cleanup = shortcuts::delete_shortcuts(&self.config.shortcuts);

        if !cleanup.failed.is_empty() {
            let errors: Vec<String> = cleanup
                .failed
                .iter()
                .map(|(path, e)| format!("{}: {}", path.display(), e))
                .collect();
            return StepReport::warning(Step::Shortcut, "部分快捷方式删除失败", errors.join("; "));
        }

        if cleanup.removed.is_empty() {
            StepReport::skipped(Step::Shortcut, "未找到快捷方式")
        } else {
            let removed: Vec<String> = cleanup.removed.iter().map(|p| p.display().to_string()).collect();
            StepReport::success(Step::Shortcut, format!("已删除 {}", removed.join(", ")))
        }
    }

    fn remove_install_dir(&self) -> StepReport {
        let dir = &self.config.install_dir;

        if !dir.exists() {
            return StepReport::skipped(Step::Directory, format!("安装目录不存在: {}", dir.display()));
        }

        if !self.config.force {
            let question = format!("删除安装目录 {} 及其全部内容吗?", dir.display());
            if !self.deps.prompt.confirm(&question) {
                tracing::info!("保留安装目录 {}", dir.display());
                return StepReport::skipped(Step::Directory, format!("已保留安装目录 {}", dir.display()));
            }
        }

        match filesystem::delete_install_dir(dir) {
            Ok(bytes) => StepReport::success(Step::Directory, format!("已删除安装目录 {}", dir.display()))
                .with_bytes_freed(bytes),
            Err(e @ UninstallerError::CriticalSystemItem(_)) => {
                StepReport::warning(Step::Directory, "拒绝删除受保护的目录", e)
            }
            Err(e) => StepReport::warning(
                Step::Directory,
                format!(
                    "删除安装目录 {} 失败, 可能有程序仍占用其中的文件, 关闭后手动删除",
                    dir.display()
                ),
                e,
            ),
        }
    }

    fn cleanup_helpers(&self, leftovers: &[PathBuf]) -> StepReport {
        if leftovers.is_empty() {
            return StepReport::skipped(Step::HelperCleanup, "未使用辅助程序");
        }

        let (disposable, kept): (Vec<&PathBuf>, Vec<&PathBuf>) = leftovers
            .iter()
            .partition(|path| self.config.is_disposable_helper(path));

        for path in &kept {
            tracing::debug!("保留辅助程序 {}", path.display());
        }

        if disposable.is_empty() {
            return StepReport::skipped(Step::HelperCleanup, "使用的辅助程序不是临时文件, 已保留");
        }

        let mut removed = Vec::new();
        let mut errors = Vec::new();

        for path in disposable {
            match filesystem::delete_file(path) {
                Ok(true) => removed.push(path.display().to_string()),
                Ok(false) => {}
                Err(e) => errors.push(format!("{}: {}", path.display(), e)),
            }
        }

        if !errors.is_empty() {
            StepReport::warning(Step::HelperCleanup, "删除辅助程序失败", errors.join("; "))
        } else if removed.is_empty() {
            StepReport::skipped(Step::HelperCleanup, "辅助程序已不存在")
        } else {
            StepReport::success(Step::HelperCleanup, format!("已删除 {}", removed.join(", ")))
        }
    }
}
