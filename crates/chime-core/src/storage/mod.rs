mod config;
mod store;

pub use config::{AlarmConfig, Config, NotificationsConfig};
pub use store::AlarmStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/chime[-dev]/` based on CHIME_ENV.
///
/// Set CHIME_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHIME_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("chime-dev")
    } else {
        base_dir.join("chime")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
