use crate::modules::common::utils;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVICE_NAME: &str = "FastSearchService";
pub const DEFAULT_APP_DIR_NAME: &str = "FastSearch";
pub const DEFAULT_FIREWALL_RULE: &str = "FastSearch Web API";
pub const DEFAULT_SHORTCUT_NAME: &str = "FastSearch.lnk";
pub const DEFAULT_SCRIPT_INTERPRETER: &str = "python";
pub const HELPER_BINARY_NAME: &str = "nssm.exe";

/// 一次卸载运行的配置, 运行期间不变
#[derive(Debug, Clone)]
pub struct UninstallConfig {
    pub install_dir: PathBuf,
    pub service_name: String,
    /// 跳过所有确认, 视为同意
    pub force: bool,
    pub firewall_rule: String,
    pub shortcuts: Vec<PathBuf>,
    pub helper_candidates: Vec<PathBuf>,
    /// 安装时下载到临时目录的 nssm, 卸载结束后只删除这一个
    pub temp_helper: PathBuf,
    pub payload_script: PathBuf,
    pub script_interpreter: String,
    /// 同时清理当前用户的 PATH
    pub include_user_path: bool,
    pub stop_timeout: Duration,
    /// 删除服务后再次查询前的等待时间
    pub settle_delay: Duration,
}

impl UninstallConfig {
    pub fn new(install_dir: impl Into<PathBuf>, service_name: impl Into<String>) -> Self {
        let install_dir = install_dir.into();
        let temp_helper = std::env::temp_dir().join(HELPER_BINARY_NAME);

        Self {
            shortcuts: default_shortcuts(),
            helper_candidates: default_helper_candidates(&install_dir, &temp_helper),
            temp_helper,
            payload_script: default_payload_script(&install_dir),
            install_dir,
            service_name: service_name.into(),
            force: false,
            firewall_rule: DEFAULT_FIREWALL_RULE.to_string(),
            script_interpreter: DEFAULT_SCRIPT_INTERPRETER.to_string(),
            include_user_path: false,
            stop_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(2),
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_firewall_rule(mut self, rule: impl Into<String>) -> Self {
        self.firewall_rule = rule.into();
        self
    }

    pub fn with_shortcuts(mut self, shortcuts: Vec<PathBuf>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// 额外的辅助程序位置, 优先于默认位置
    pub fn with_helper(mut self, helper: PathBuf) -> Self {
        self.helper_candidates.insert(0, helper);
        self
    }

    pub fn with_helper_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.helper_candidates = candidates;
        self
    }

    /// 替换临时 nssm 的位置, 候选列表中的旧位置一并替换
    pub fn with_temp_helper(mut self, helper: PathBuf) -> Self {
        for candidate in self.helper_candidates.iter_mut() {
            if *candidate == self.temp_helper {
                *candidate = helper.clone();
            }
        }
        self.temp_helper = helper;
        self
    }

    pub fn with_payload_script(mut self, script: PathBuf) -> Self {
        self.payload_script = script;
        self
    }

    pub fn with_script_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.script_interpreter = interpreter.into();
        self
    }

    pub fn with_user_path(mut self, include: bool) -> Self {
        self.include_user_path = include;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// 卸载结束后可以删除的辅助程序
    ///
    /// 只有临时目录中的 nssm 可以删除。安装目录中的随目录一起处理,
    /// 用户通过 --helper 指定的不属于本程序。
    pub fn is_disposable_helper(&self, path: &Path) -> bool {
        path == self.temp_helper && !path.starts_with(&self.install_dir)
    }

    /// 写入 PATH 时使用的目录形式
    pub fn install_dir_entry(&self) -> String {
        self.install_dir.to_string_lossy().to_string()
    }
}

/// 默认安装目录: %ProgramFiles%\FastSearch
pub fn default_install_dir() -> PathBuf {
    utils::program_files_dir().join(DEFAULT_APP_DIR_NAME)
}

fn default_shortcuts() -> Vec<PathBuf> {
    utils::desktop_dirs()
        .into_iter()
        .map(|dir| dir.join(DEFAULT_SHORTCUT_NAME))
        .collect()
}

/// 安装目录内随附的 nssm, 以及安装时下载到临时目录的 nssm
fn default_helper_candidates(install_dir: &Path, temp_helper: &Path) -> Vec<PathBuf> {
    vec![
        install_dir.join(HELPER_BINARY_NAME),
        install_dir.join("tools").join(HELPER_BINARY_NAME),
        temp_helper.to_path_buf(),
    ]
}

fn default_payload_script(install_dir: &Path) -> PathBuf {
    install_dir.join("scripts").join("uninstall_service.py")
}
