use anyhow::Result;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

// App settings structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Substring of the output device name; default device when unset
    pub output_device: Option<String>,
    pub master_volume: f32,
    pub show_key_labels: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            output_device: None,
            master_volume: 0.5,
            show_key_labels: true,
        }
    }
}

impl AppSettings {
    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Self {
        let path = match settings_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}, using default settings", e);
                return AppSettings::default();
            }
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not read {}: {}, using default settings", path.display(), e);
                AppSettings::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}", path.display());
            return Ok(AppSettings::default());
        }

        let file = File::open(path)?;
        let mut settings: AppSettings = serde_json::from_reader(file)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn settings_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
    path.push("keyboard-piano");
    path.push("settings.json");
    Ok(path)
}
