pub mod error;
pub mod logging;
pub mod process;
pub mod prompt;
pub mod utils;
