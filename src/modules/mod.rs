pub mod cleaner;
pub mod common;
pub mod env_path;
pub mod firewall;
pub mod orchestrator;
pub mod privilege;
pub mod reporter;
pub mod service;
