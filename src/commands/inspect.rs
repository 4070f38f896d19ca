//! inspect 命令 - 预览还残留哪些卸载目标

use super::TargetArgs;
use crate::modules::common::process::SystemRunner;
use crate::modules::common::utils;
use crate::modules::env_path::{self, PathScope, PathStore};
use crate::modules::firewall::NetshFirewall;
use crate::modules::orchestrator::inspect::{self, InspectReport};
use crate::modules::service;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct InspectCommand {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn execute(cmd: InspectCommand) -> Result<()> {
    let config = cmd.target.to_config();
    tracing::info!("检查 {} 的残留项", config.service_name);

    let runner = SystemRunner;
    let services = service::system_service_control();
    let firewall = NetshFirewall::new(&runner);

    let machine_path = env_path::system_path_store(PathScope::Machine);
    let user_path = env_path::system_path_store(PathScope::User);
    let mut path_stores: Vec<&dyn PathStore> = vec![machine_path.as_ref()];
    if config.include_user_path {
        path_stores.push(user_path.as_ref());
    }

    let report = inspect::inspect(&config, services.as_ref(), &firewall, &path_stores);

    if cmd.target.is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(())
}

fn print_table(report: &InspectReport) {
    println!("\n{}", "=".repeat(80));
    println!("{:<16} {}", "项目", "状态");
    println!("{}", "=".repeat(80));

    let service = match (&report.service_state, &report.service_error) {
        (Some(state), _) => state.to_string(),
        (None, Some(error)) => format!("无法查询 ({})", error),
        (None, None) => "未知".to_string(),
    };
    println!("{:<16} {} [{}]", "服务", service, report.service_name);

    let firewall = match report.firewall_rule_present {
        Some(true) => "存在",
        Some(false) => "不存在",
        None => "无法查询",
    };
    println!("{:<16} {} [{}]", "防火墙规则", firewall, report.firewall_rule);

    for entry in &report.path_entries {
        let status = match (entry.contains_entry, &entry.error) {
            (Some(true), _) => "包含安装目录".to_string(),
            (Some(false), _) => "不包含".to_string(),
            (None, Some(error)) => format!("无法读取 ({})", error),
            (None, None) => "未知".to_string(),
        };
        println!("{:<16} {}", format!("{} PATH", entry.scope), status);
    }

    if report.shortcuts.is_empty() {
        println!("{:<16} 不存在", "快捷方式");
    } else {
        for shortcut in &report.shortcuts {
            println!("{:<16} {}", "快捷方式", shortcut);
        }
    }

    let install_dir = if report.install_dir_exists {
        let size = report
            .install_dir_size
            .map(utils::format_size)
            .unwrap_or_default();
        format!("存在 {}", size)
    } else {
        "不存在".to_string()
    };
    println!("{:<16} {} [{}]", "安装目录", install_dir.trim_end(), report.install_dir);

    println!(
        "{:<16} {}",
        "辅助程序",
        report.helper.as_deref().unwrap_or("不存在")
    );
    println!(
        "{:<16} {}",
        "卸载脚本",
        report.payload_script.as_deref().unwrap_or("不存在")
    );

    println!("{}", "=".repeat(80));
    if report.has_leftovers() {
        println!("仍有残留, 使用 uninstall 命令清理\n");
    } else {
        println!("没有发现残留\n");
    }
}
