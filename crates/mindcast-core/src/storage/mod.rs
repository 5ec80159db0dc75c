mod config;

pub use config::{
    fallback_birth_date, Config, DisplayConfig, ForecastConfig, ProfileConfig, ThresholdsConfig,
};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `MINDCAST_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/mindcast[-dev]/`, based on `MINDCAST_ENV`; set
/// `MINDCAST_ENV=dev` to use the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> crate::error::Result<PathBuf> {
    let dir = match std::env::var_os("MINDCAST_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MINDCAST_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("mindcast-dev")
            } else {
                base_dir.join("mindcast")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
