//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Toggles edited on the Setting screen.
    pub preferences: PreferencesCfg,
    /// Seed data for the shopping list.
    pub store: StoreCfg,
    /// Content of the Profile screen.
    pub profile: ProfileCfg,
    /// Timing knobs for the event loop and toasts.
    pub ui: UiCfg,
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesCfg {
    /// Show a toast when an item is added via the quick-add key.
    pub notifications: bool,
    /// Render with the dark palette.
    pub dark_mode: bool,
}

/// Initial items loaded at startup. Items added at runtime are not saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCfg {
    pub default_items: Vec<String>,
}

/// Profile card text and the labelled rows below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCfg {
    pub greeting: String,
    pub bio: String,
    pub farewell: String,
    pub entries: Vec<ProfileEntry>,
}

/// One labelled row on the Profile screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub label: String,
    pub value: String,
}

/// Event loop timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiCfg {
    /// Interval between animation ticks.
    pub tick_rate_ms: u64,
    /// How long the "Adding: ..." toast stays visible.
    pub toast_ms: u64,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferences: PreferencesCfg {
                notifications: true,
                dark_mode: false,
            },
            store: StoreCfg {
                default_items: ["Susu Segar", "Roti Tawar", "Telur Ayam", "Apel Fuji", "Daging Sapi"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
            profile: ProfileCfg {
                greeting: "Halo!".into(),
                bio: "Saya mahasiswa yang tertarik untuk mengembangkan aplikasi mobile yang membantu aktivitas harian.".into(),
                farewell: "Senang bisa mengenalmu!".into(),
                entries: [
                    ("Nama", "Alfa Rino Svedrilio"),
                    ("NIM", "2311522005"),
                    ("Hobi", "Membaca"),
                    ("Tempat, Tanggal Lahir", "Payakumbuh, 13 Agustus 2005"),
                    ("Peminatan", "Mobile Programming"),
                ]
                .into_iter()
                .map(|(label, value)| ProfileEntry {
                    label: label.into(),
                    value: value.into(),
                })
                .collect(),
            },
            ui: UiCfg {
                tick_rate_ms: 50,
                toast_ms: 4000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_file() {
        // First run writes the defaults to disk.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.store.default_items.len(), 5);
    }

    #[test]
    fn test_saved_preferences_survive_reload() {
        // Toggled preferences are read back unchanged.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.preferences.notifications = false;
        cfg.preferences.dark_mode = true;
        cfg.save(&path).unwrap();
        let loaded = Config::load_or_default(&path).unwrap();
        assert!(!loaded.preferences.notifications);
        assert!(loaded.preferences.dark_mode);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "preferences = 3").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
