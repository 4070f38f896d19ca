pub mod filesystem;
pub mod models;
pub mod safety;
pub mod shortcuts;
