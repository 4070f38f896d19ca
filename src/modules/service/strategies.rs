//! 服务删除的后备链
//!
//! 按顺序尝试: 随附的 nssm 辅助程序 → 安装包内的卸载脚本 → sc.exe delete。
//! 第一个报告成功的策略结束整条链, 不可用的策略直接跳过。

use crate::modules::common::error::UninstallerError;
use crate::modules::common::process::ProcessRunner;
use crate::modules::orchestrator::models::UninstallConfig;
use std::path::PathBuf;

/// sc.exe: 服务已标记为删除, 等所有句柄关闭后才会真正消失
const ERROR_SERVICE_MARKED_FOR_DELETE: i32 = 1072;
/// sc.exe: 指定的服务不存在
const ERROR_SERVICE_DOES_NOT_EXIST: i32 = 1060;

pub trait RemovalStrategy {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    fn remove(&self, service_name: &str) -> Result<(), UninstallerError>;

    /// 使用过该策略后需要清理的文件
    fn leftover(&self) -> Option<PathBuf> {
        None
    }
}

/// 通过 nssm.exe 删除服务
pub struct HelperBinaryStrategy<'a> {
    candidates: Vec<PathBuf>,
    runner: &'a dyn ProcessRunner,
}

impl<'a> HelperBinaryStrategy<'a> {
    pub fn new(candidates: Vec<PathBuf>, runner: &'a dyn ProcessRunner) -> Self {
        Self { candidates, runner }
    }

    fn locate(&self) -> Option<&PathBuf> {
        self.candidates.iter().find(|p| p.is_file())
    }
}

impl RemovalStrategy for HelperBinaryStrategy<'_> {
    fn name(&self) -> &'static str {
        "nssm"
    }

    fn is_available(&self) -> bool {
        self.locate().is_some()
    }

    fn remove(&self, service_name: &str) -> Result<(), UninstallerError> {
        let helper = self
            .locate()
            .ok_or_else(|| UninstallerError::Other("未找到服务管理辅助程序".to_string()))?;

        let helper = helper.to_string_lossy();
        let output = self.runner.run(&helper, &["remove", service_name, "confirm"])?;

        if output.success() {
            Ok(())
        } else {
            Err(UninstallerError::Command(format!("nssm remove: {}", output.describe())))
        }
    }

    fn leftover(&self) -> Option<PathBuf> {
        self.locate().cloned()
    }
}

/// 通过安装包内的卸载脚本删除服务, 需要脚本和解释器都存在
pub struct PayloadScriptStrategy<'a> {
    interpreter: String,
    script: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> PayloadScriptStrategy<'a> {
    pub fn new(interpreter: impl Into<String>, script: PathBuf, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            interpreter: interpreter.into(),
            script,
            runner,
        }
    }
}

impl RemovalStrategy for PayloadScriptStrategy<'_> {
    fn name(&self) -> &'static str {
        "payload-script"
    }

    fn is_available(&self) -> bool {
        if !self.script.is_file() {
            return false;
        }

        match self.runner.run(&self.interpreter, &["--version"]) {
            Ok(output) if output.success() => true,
            Ok(output) => {
                tracing::debug!("解释器 {} 不可用: {}", self.interpreter, output.describe());
                false
            }
            Err(e) => {
                tracing::debug!("解释器 {} 不可用: {}", self.interpreter, e);
                false
            }
        }
    }

    fn remove(&self, service_name: &str) -> Result<(), UninstallerError> {
        let script = self.script.to_string_lossy();
        let output = self.runner.run(&self.interpreter, &[&*script, service_name])?;

        if output.success() {
            Ok(())
        } else {
            Err(UninstallerError::Command(format!("卸载脚本: {}", output.describe())))
        }
    }
}

/// 系统自带的 sc.exe delete
pub struct NativeCommandStrategy<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> NativeCommandStrategy<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl RemovalStrategy for NativeCommandStrategy<'_> {
    fn name(&self) -> &'static str {
        "sc.exe"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn remove(&self, service_name: &str) -> Result<(), UninstallerError> {
        let output = self.runner.run("sc.exe", &["delete", service_name])?;

        match output.code {
            Some(0) => Ok(()),
            Some(ERROR_SERVICE_MARKED_FOR_DELETE) => {
                tracing::warn!("服务 {} 已标记为删除, 需等待所有句柄关闭", service_name);
                Ok(())
            }
            Some(ERROR_SERVICE_DOES_NOT_EXIST) => Ok(()),
            _ => Err(UninstallerError::Command(format!("sc.exe delete: {}", output.describe()))),
        }
    }
}

/// 按默认顺序构建后备链
pub fn default_chain<'a>(
    config: &UninstallConfig,
    runner: &'a dyn ProcessRunner,
) -> Vec<Box<dyn RemovalStrategy + 'a>> {
    vec![
        Box::new(HelperBinaryStrategy::new(config.helper_candidates.clone(), runner)),
        Box::new(PayloadScriptStrategy::new(
            config.script_interpreter.clone(),
            config.payload_script.clone(),
            runner,
        )),
        Box::new(NativeCommandStrategy::new(runner)),
    ]
}

/// 后备链执行结果
#[derive(Debug, Default)]
pub struct ChainOutcome {
    /// 成功删除服务的策略
    pub removed_by: Option<&'static str>,
    pub attempted: Vec<&'static str>,
    pub errors: Vec<String>,
    pub leftovers: Vec<PathBuf>,
}

/// 依次尝试, 直到某个策略成功
pub fn run_chain(chain: &[Box<dyn RemovalStrategy + '_>], service_name: &str) -> ChainOutcome {
    let mut outcome = ChainOutcome::default();

    for strategy in chain {
        if !strategy.is_available() {
            tracing::debug!("跳过不可用的删除方式: {}", strategy.name());
            continue;
        }

        outcome.attempted.push(strategy.name());
        if let Some(path) = strategy.leftover() {
            outcome.leftovers.push(path);
        }

        tracing::info!("使用 {} 删除服务 {}", strategy.name(), service_name);
        match strategy.remove(service_name) {
            Ok(()) => {
                outcome.removed_by = Some(strategy.name());
                break;
            }
            Err(e) => {
                tracing::warn!("{} 删除服务失败: {}", strategy.name(), e);
                outcome.errors.push(format!("{}: {}", strategy.name(), e));
            }
        }
    }

    outcome
}
