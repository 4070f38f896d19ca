pub mod commands;
pub mod modules;

pub use modules::cleaner;
pub use modules::common::error::UninstallerError;
pub use modules::common::utils;
pub use modules::orchestrator;
pub use modules::reporter;
