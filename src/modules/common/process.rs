//! 外部命令执行
//!
//! sc.exe、netsh、nssm 以及卸载脚本都通过 [`ProcessRunner`] 调用,
//! 测试中可以替换为记录调用的实现。

use crate::modules::common::error::UninstallerError;
use std::process::{Command, Stdio};

/// 命令执行结果
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// 失败时用于日志的简短描述
    pub fn describe(&self) -> String {
        let message = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };

        match self.code {
            Some(code) if message.is_empty() => format!("退出码 {}", code),
            Some(code) => format!("退出码 {}: {}", code, message),
            None => format!("进程被终止: {}", message),
        }
    }
}

pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, UninstallerError>;
}

/// 直接启动子进程并等待结束
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, UninstallerError> {
        tracing::debug!("执行命令: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| UninstallerError::Command(format!("无法启动 {}: {}", program, e)))?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        tracing::debug!("{} 结束, 退出码 {:?}", program, result.code);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_prefers_stderr() {
        let output = CommandOutput {
            code: Some(5),
            stdout: "ignored".to_string(),
            stderr: "Access is denied.\r\n".to_string(),
        };
        assert!(!output.success());
        assert_eq!(output.describe(), "退出码 5: Access is denied.");
    }

    #[test]
    fn describe_without_output() {
        let output = CommandOutput {
            code: Some(1060),
            ..CommandOutput::default()
        };
        assert_eq!(output.describe(), "退出码 1060");
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let result = SystemRunner.run("fastsearch-definitely-missing-program", &[]);
        assert!(matches!(result, Err(UninstallerError::Command(_))));
    }
}
