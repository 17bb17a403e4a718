//! Runtime settings
//!
//! Read from a JSON file at startup. Every field is optional in the file;
//! gameplay balance lives in `sim::tuning`, not here.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::sim::{Tuning, Variant};

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "ASTRO_SHOOTER_SETTINGS";
/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read settings {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ruleset to play
    pub variant: Variant,
    /// Fixed RNG seed; derived from the wall clock when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Directory holding `shoot.wav` and `game-over.wav`
    pub asset_dir: PathBuf,

    /// Frames the headless driver simulates
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            asset_dir: PathBuf::from("assets"),
            demo_frames: 60 * 60,
        }
    }
}

impl Settings {
    /// Parse settings from a file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings file location: `$ASTRO_SHOOTER_SETTINGS` or `settings.json`
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings, falling back to defaults when the file is absent or bad
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e} - using defaults");
                Self::default()
            }
        }
    }

    /// Balance table for the configured variant
    pub fn tuning(&self) -> Tuning {
        Tuning::for_variant(self.variant)
    }

    /// Configured seed, or one derived from the wall clock
    pub fn seed_or_time(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "variant": "Classic", "seed": 42 }"#).unwrap();
        assert_eq!(s.variant, Variant::Classic);
        assert_eq!(s.seed_or_time(), 42);
        assert_eq!(s.master_volume, 0.8);
        assert_eq!(s.demo_frames, 3600);
        assert_eq!(s.tuning().max_enemies, 1);
    }

    #[test]
    fn test_roundtrip_default() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Settings::default());
    }

    #[test]
    fn test_load_from_errors() {
        let dir = std::env::temp_dir().join(format!("astro-shooter-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let missing = Settings::load_from(dir.join("absent.json"));
        assert!(matches!(missing, Err(SettingsError::Io { .. })));

        let bad = dir.join("bad.json");
        fs::write(&bad, "{ variant: ").unwrap();
        let err = Settings::load_from(&bad).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid settings"));
        assert!(std::error::Error::source(&err).is_some());

        let good = dir.join("good.json");
        fs::write(&good, r#"{ "muted": true, "demo_frames": 10 }"#).unwrap();
        let s = Settings::load_from(&good).unwrap();
        assert!(s.muted);
        assert_eq!(s.demo_frames, 10);
        assert_eq!(s.variant, Variant::Extended);

        let _ = fs::remove_dir_all(dir);
    }
}
