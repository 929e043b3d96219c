//! User settings, read once at startup from the OS config directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::controller::DEFAULT_GALLERY_LIMIT;
use crate::model::notification::DEFAULT_TOAST_LIFETIME;

/// Longest timer period accepted from settings; `Instant` arithmetic
/// overflows well before `u64::MAX` seconds.
pub const MAX_TIMER_PERIOD: Duration = Duration::from_secs(86_400);

/// Persisted user settings (`settings.json`). Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabSettings {
    /// Overrides where the key/value store keeps its files.
    pub data_dir: Option<PathBuf>,
    /// Base URL for the upload and results pages, e.g. `https://lab.example.com/`.
    pub pages_base_url: Option<String>,
    pub sweep_interval_secs: u64,
    pub notification_lifetime_ms: u64,
    pub gallery_limit: usize,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            pages_base_url: None,
            sweep_interval_secs: 30,
            notification_lifetime_ms: DEFAULT_TOAST_LIFETIME.as_millis() as u64,
            gallery_limit: DEFAULT_GALLERY_LIMIT,
        }
    }
}

impl LabSettings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let (config_dir, _) = Self::dirs();
        Self::load_from(&config_dir.join("settings.json"))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1)).min(MAX_TIMER_PERIOD)
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_lifetime_ms).min(MAX_TIMER_PERIOD)
    }

    /// Directory for the key/value store.
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| Self::dirs().1)
    }

    /// (config dir, data dir) for this application.
    fn dirs() -> (PathBuf, PathBuf) {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "AiLearningLab") {
            (
                proj_dirs.config_dir().to_path_buf(),
                proj_dirs.data_dir().to_path_buf(),
            )
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            (dir.clone(), dir.join("data"))
        }
    }
}
