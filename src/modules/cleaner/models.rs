use serde::{Deserialize, Serialize};

/// 卸载步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Service,
    Firewall,
    PathCleanup,
    Shortcut,
    Directory,
    HelperCleanup,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Service => write!(f, "服务"),
            Step::Firewall => write!(f, "防火墙规则"),
            Step::PathCleanup => write!(f, "PATH"),
            Step::Shortcut => write!(f, "快捷方式"),
            Step::Directory => write!(f, "安装目录"),
            Step::HelperCleanup => write!(f, "辅助程序"),
        }
    }
}

/// 单个步骤的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalOutcome {
    Success,
    /// 目标不存在或被保留
    Skipped,
    /// 失败, 但不影响后续步骤
    Warning,
}

impl std::fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalOutcome::Success => write!(f, "成功"),
            RemovalOutcome::Skipped => write!(f, "跳过"),
            RemovalOutcome::Warning => write!(f, "警告"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: Step,
    pub outcome: RemovalOutcome,
    pub detail: String,
    pub error: Option<String>,
    pub bytes_freed: u64,
}

impl StepReport {
    pub fn success(step: Step, detail: impl Into<String>) -> Self {
        Self::new(step, RemovalOutcome::Success, detail)
    }

    pub fn skipped(step: Step, detail: impl Into<String>) -> Self {
        Self::new(step, RemovalOutcome::Skipped, detail)
    }

    pub fn warning(step: Step, detail: impl Into<String>, error: impl ToString) -> Self {
        let mut report = Self::new(step, RemovalOutcome::Warning, detail);
        report.error = Some(error.to_string());
        report
    }

    pub fn with_bytes_freed(mut self, bytes: u64) -> Self {
        self.bytes_freed = bytes;
        self
    }

    fn new(step: Step, outcome: RemovalOutcome, detail: impl Into<String>) -> Self {
        Self {
            step,
            outcome,
            detail: detail.into(),
            error: None,
            bytes_freed: 0,
        }
    }
}
