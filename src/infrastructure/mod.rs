//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where configuration, preferences and log files live on the host.

pub mod paths;

pub use paths::{default_config_path, expand_tilde, get_data_dir, preferences_path};
