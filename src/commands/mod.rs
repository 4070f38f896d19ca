pub mod inspect;
pub mod uninstall;

use crate::modules::orchestrator::models::{
    self, UninstallConfig, DEFAULT_FIREWALL_RULE, DEFAULT_SCRIPT_INTERPRETER, DEFAULT_SERVICE_NAME,
};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 停止并删除服务, 清理防火墙规则、PATH、快捷方式和安装目录
    Uninstall(uninstall::UninstallCommand),

    /// 只检查残留项, 不做任何修改
    Inspect(inspect::InspectCommand),
}

/// 卸载目标的位置参数, uninstall 与 inspect 共用
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// 安装目录 (默认 %ProgramFiles%\FastSearch)
    #[arg(long, env = "FASTSEARCH_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// 服务名称
    #[arg(long, env = "FASTSEARCH_SERVICE_NAME", default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,

    /// 防火墙规则显示名称
    #[arg(long, default_value = DEFAULT_FIREWALL_RULE)]
    pub firewall_rule: String,

    /// 额外的 nssm.exe 位置
    #[arg(long)]
    pub helper: Option<PathBuf>,

    /// 运行卸载脚本的解释器
    #[arg(long, default_value = DEFAULT_SCRIPT_INTERPRETER)]
    pub script_interpreter: String,

    /// 同时处理当前用户的 PATH
    #[arg(long)]
    pub user_path: bool,

    /// 输出格式 (table/json)
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl TargetArgs {
    pub fn to_config(&self) -> UninstallConfig {
        let install_dir = self
            .install_dir
            .clone()
            .unwrap_or_else(models::default_install_dir);

        let mut config = UninstallConfig::new(install_dir, self.service_name.clone())
            .with_firewall_rule(self.firewall_rule.clone())
            .with_script_interpreter(self.script_interpreter.clone())
            .with_user_path(self.user_path);

        if let Some(helper) = &self.helper {
            config = config.with_helper(helper.clone());
        }

        config
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn parses_uninstall_options() {
        let cli = TestCli::try_parse_from([
            "fastsearch-uninstall",
            "uninstall",
            "--install-dir",
            r"D:\FastSearch",
            "--force",
            "--user-path",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::Uninstall(cmd) = cli.command else {
            panic!("expected uninstall");
        };
        assert!(cmd.force);
        assert!(cmd.target.is_json());

        let config = cmd.to_config();
        assert_eq!(config.install_dir, PathBuf::from(r"D:\FastSearch"));
        assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
        assert!(config.force);
        assert!(config.include_user_path);
    }

    #[test]
    fn inspect_has_no_force_flag() {
        let result = TestCli::try_parse_from(["fastsearch-uninstall", "inspect", "--force"]);
        assert!(result.is_err());
    }
}
