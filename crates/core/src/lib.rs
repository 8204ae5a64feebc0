//! SurfsUp Core Library
//!
//! Shared utilities for the climate API service:
//! - Configuration loading (XDG-compliant)
//! - File system utilities
//! - Default locations

mod config;
pub mod fs;

use std::path::PathBuf;

pub use config::{find_config_file, get_xdg_data_dir, load_config, ConfigSource};
pub use fs::{first_existing, is_file};

/// Application name used for XDG paths
pub const APP_NAME: &str = "surfsup";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// File name of the bundled measurement database
pub const DEFAULT_DATABASE_FILE: &str = "hawaii.sqlite";

/// Locate the measurement database when none was configured.
///
/// Prefers `./Resources/hawaii.sqlite`, then the XDG data directory. When neither
/// exists the local path is returned so the startup error names it.
pub fn default_database_path() -> String {
    let local = PathBuf::from("Resources").join(DEFAULT_DATABASE_FILE);
    let xdg = get_xdg_data_dir().join(DEFAULT_DATABASE_FILE);

    first_existing([local.clone(), xdg])
        .unwrap_or(local)
        .to_string_lossy()
        .into_owned()
}
