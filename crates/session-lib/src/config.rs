// ============================
// crates/session-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory for the persisted session slots
    pub data_dir: PathBuf,
    /// Log level passed to the subscriber when `RUST_LOG` is unset
    pub log_level: String,
    /// Toast lifetime in seconds
    pub toast_ttl_secs: u64,
    /// Capacity of the session event broadcast channel
    pub event_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            toast_ttl_secs: 3,
            event_capacity: 64,
        }
    }
}

impl Settings {
    /// Load settings from `liveclass.toml` and `LIVECLASS_`-prefixed
    /// environment variables, falling back to defaults for missing keys.
    pub fn load() -> Result<Self> {
        Self::load_from("liveclass.toml")
    }

    /// Load settings from an explicit TOML path plus the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("LIVECLASS_"))
            .extract()?;
        Ok(settings)
    }

    /// Toast lifetime as a [`Duration`]
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let settings = Settings::default();
        assert_eq!(settings.toast_ttl_secs, 3);
        assert_eq!(settings.toast_ttl(), Duration::from_secs(3));
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.event_capacity, 64);
    }

    #[test]
    fn missing_file_still_loads_defaults() {
        let settings = Settings::load_from("does-not-exist.toml").unwrap();
        assert_eq!(settings.log_level, "info");
    }
}
