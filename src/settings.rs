//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web build. Only preferences live here;
//! a session is never saved.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRACE_DELAY_SECS, DEFAULT_TIME_LIMIT_SECS};
use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Countdown length in seconds
    pub time_limit_secs: f32,
    /// Pause between the last pickup and the success screen
    pub grace_delay_secs: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Skip the floating pickup text
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            grace_delay_secs: DEFAULT_GRACE_DELAY_SECS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "deposit_run_settings";

    /// Parse and validate a stored settings payload
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the session or mixer can't use
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("time_limit_secs", self.time_limit_secs, 1.0, 3600.0)?;
        check_range("grace_delay_secs", self.grace_delay_secs, 0.0, 10.0)?;
        check_range("master_volume", self.master_volume, 0.0, 1.0)?;
        check_range("sfx_volume", self.sfx_volume, 0.0, 1.0)?;
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {e}"),
            }
        }
    }

    /// Native: read `DEPOSIT_RUN_SETTINGS` as inline JSON, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("DEPOSIT_RUN_SETTINGS") {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring DEPOSIT_RUN_SETTINGS: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), SettingsError> {
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}
