//! Application lifecycle and execution modes

pub mod lifetime;
pub mod modes;

pub use lifetime::startup::{StartupContext, StorageContext, prepare_startup, prepare_storage};
