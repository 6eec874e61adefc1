//! Configuration persisted between generator runs

pub mod defaults;

pub use defaults::{default_defaults_path, StoredDefaults};
