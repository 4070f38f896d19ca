use thiserror::Error;

#[derive(Error, Debug)]
pub enum UninstallerError {
    #[error("服务错误: {0}")]
    Service(String),

    #[error("防火墙错误: {0}")]
    Firewall(String),

    #[error("环境变量错误: {0}")]
    Environment(String),

    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("命令执行失败: {0}")]
    Command(String),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("关键系统项: {0}")]
    CriticalSystemItem(String),

    #[error("已中止: {0}")]
    Aborted(String),

    #[error("不支持的平台: {0}")]
    Unsupported(String),

    #[error("其他错误: {0}")]
    Other(String),
}
