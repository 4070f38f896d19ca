use crate::modules::cleaner::models::{RemovalOutcome, StepReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 卸载汇总, 只用于输出, 不持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UninstallSummary {
    pub id: String,
    pub service_name: String,
    pub install_dir: String,
    pub generated_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

impl UninstallSummary {
    pub fn new(service_name: String, install_dir: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            service_name,
            install_dir,
            generated_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, report: StepReport) {
        self.steps.push(report);
    }

    pub fn count(&self, outcome: RemovalOutcome) -> usize {
        self.steps.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn warning_count(&self) -> usize {
        self.count(RemovalOutcome::Warning)
    }

    pub fn total_bytes_freed(&self) -> u64 {
        self.steps.iter().map(|r| r.bytes_freed).sum()
    }

    /// 所有步骤都没有警告
    pub fn is_clean(&self) -> bool {
        self.warning_count() == 0
    }
}
