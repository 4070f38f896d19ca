//! uninstall 命令 - 停止并删除服务, 清理所有残留

use super::TargetArgs;
use crate::modules::cleaner::models::{RemovalOutcome, StepReport};
use crate::modules::common::process::SystemRunner;
use crate::modules::common::prompt::ConsolePrompt;
use crate::modules::common::utils;
use crate::modules::env_path::{self, PathScope, PathStore};
use crate::modules::firewall::NetshFirewall;
use crate::modules::orchestrator::models::UninstallConfig;
use crate::modules::orchestrator::{Orchestrator, UninstallDeps};
use crate::modules::privilege::TokenElevationProbe;
use crate::modules::reporter::{self, models::UninstallSummary};
use crate::modules::service::{self, strategies};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct UninstallCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// 跳过所有确认 (视为同意)
    #[arg(short, long)]
    pub force: bool,

    /// 生成 HTML 报告的路径
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl UninstallCommand {
    pub fn to_config(&self) -> UninstallConfig {
        self.target.to_config().with_force(self.force)
    }
}

pub fn execute(cmd: UninstallCommand) -> Result<()> {
    let config = cmd.to_config();
    let json = cmd.target.is_json();

    if !json {
        println!("=== 卸载服务: {} ===\n", config.service_name);
        println!("  安装目录: {}", config.install_dir.display());
        if config.force {
            println!("  强制模式: 不再确认");
        }
        println!();
    }

    let runner = SystemRunner;
    let services = service::system_service_control();
    let firewall = NetshFirewall::new(&runner);

    let machine_path = env_path::system_path_store(PathScope::Machine);
    let user_path = env_path::system_path_store(PathScope::User);
    let mut path_stores: Vec<&dyn PathStore> = vec![machine_path.as_ref()];
    if config.include_user_path {
        path_stores.push(user_path.as_ref());
    }

    let print_step = |report: &StepReport| {
        if !json {
            print_step_line(report);
        }
    };

    let deps = UninstallDeps {
        privilege: &TokenElevationProbe,
        services: services.as_ref(),
        strategies: strategies::default_chain(&config, &runner),
        firewall: &firewall,
        path_stores,
        prompt: &ConsolePrompt,
        on_step: Some(&print_step),
    };

    let summary = Orchestrator::new(&config, deps).run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if let Some(path) = &cmd.report {
        // 卸载已经完成, 报告写不出来只提示
        match write_report(&summary, path) {
            Ok(()) => {
                if !json {
                    println!("\n报告已生成: {}", path.display());
                }
            }
            Err(e) => tracing::warn!("写入报告 {} 失败: {}", path.display(), e),
        }
    }

    Ok(())
}

fn write_report(summary: &UninstallSummary, path: &Path) -> std::io::Result<()> {
    let html = reporter::html::generate_html_report(summary);
    std::fs::write(path, html)?;
    tracing::info!("报告已写入 {}", path.display());
    Ok(())
}

fn print_step_line(report: &StepReport) {
    let marker = match report.outcome {
        RemovalOutcome::Success => "成功",
        RemovalOutcome::Skipped => "跳过",
        RemovalOutcome::Warning => "警告",
    };

    println!("  [{}] {}: {}", marker, report.step, report.detail);
    if let Some(error) = &report.error {
        println!("         原因: {}", error);
    }
}

fn print_summary(summary: &UninstallSummary) {
    println!("\n--- 卸载完成 ---");
    println!("  成功: {}", summary.count(RemovalOutcome::Success));
    println!("  跳过: {}", summary.count(RemovalOutcome::Skipped));
    println!("  警告: {}", summary.warning_count());

    let freed = summary.total_bytes_freed();
    if freed > 0 {
        println!("  释放空间: {}", utils::format_size(freed));
    }

    if !summary.is_clean() {
        println!("\n  部分项目未能清理, 请根据上面的警告手动处理");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cleaner::models::Step;

    fn summary() -> UninstallSummary {
        let mut summary = UninstallSummary::new("FastSearchService".to_string(), r"C:\FastSearch".to_string());
        summary.push(StepReport::success(Step::Service, "已删除服务"));
        summary
    }

    #[test]
    fn report_is_written_to_file() {
        let path = std::env::temp_dir().join(format!("fastsearch-report-{}.html", uuid::Uuid::new_v4()));

        assert!(write_report(&summary(), &path).is_ok());
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("FastSearchService"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_report_path_is_an_error_not_a_panic() {
        let path = std::env::temp_dir()
            .join(format!("fastsearch-missing-{}", uuid::Uuid::new_v4()))
            .join("report.html");

        assert!(write_report(&summary(), &path).is_err());
    }
}
