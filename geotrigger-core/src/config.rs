use crate::constants::{
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_RADIUS, DEFAULT_TIME, DEFAULT_ZOOM, RADIUS_MAX,
    RADIUS_MIN, ZOOM_MAX, ZOOM_MIN,
};
use crate::draft::parse_time;
use crate::trigger::LatLng;
use chrono::NaiveTime;
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

// === TOML serde types (private) ===

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    map: MapSection,
    #[serde(default)]
    form: FormSection,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, default)]
struct MapSection {
    latitude: f64,
    longitude: f64,
    zoom: u8,
    icons: IconStyle,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            zoom: DEFAULT_ZOOM,
            icons: IconStyle::Unicode,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, default)]
struct FormSection {
    radius: u16,
    duration: u32,
    time: String,
}

impl Default for FormSection {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            duration: 0,
            time: DEFAULT_TIME.to_string(),
        }
    }
}

// === Public types ===

/// Glyph set used for the map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    #[default]
    Unicode,
    Ascii,
}

/// Startup settings. Every value is already clamped to its valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub start_position: LatLng,
    pub zoom: u8,
    pub icons: IconStyle,
    pub radius: u16,
    pub duration: u32,
    pub time: NaiveTime,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_file(SettingsFile::default())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "Failed to read settings file",
            ConfigError::Parse(_) => "Settings file format is invalid",
            ConfigError::Invalid(_) => "Settings file has an invalid value",
        }
    }
}

impl Settings {
    fn from_file(file: SettingsFile) -> Self {
        let fallback_time = NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default();
        let time = parse_time(&file.form.time).unwrap_or(fallback_time);
        Self {
            start_position: LatLng::new(file.map.latitude, file.map.longitude).normalized(),
            zoom: file.map.zoom.clamp(ZOOM_MIN, ZOOM_MAX),
            icons: file.map.icons,
            radius: file.form.radius.clamp(RADIUS_MIN, RADIUS_MAX),
            duration: file.form.duration,
            time,
        }
    }
}

/// Checks values that are structurally valid TOML but unusable.
fn validate(file: &SettingsFile) -> Result<(), ConfigError> {
    if !file.map.latitude.is_finite() || !file.map.longitude.is_finite() {
        return Err(ConfigError::Invalid("map position must be finite".into()));
    }
    if parse_time(&file.form.time).is_err() {
        return Err(ConfigError::Invalid(format!(
            "form.time '{}' is not HH:MM",
            file.form.time
        )));
    }
    Ok(())
}

/// Load settings from `path`.
/// Returns (Settings, Option<ConfigError>).
/// File not found → defaults, no error.
/// Read, parse or validation error → defaults with error.
pub fn load_settings(path: &Path) -> (Settings, Option<ConfigError>) {
    if !path.exists() {
        debug!(
            "No settings file at {}. Default settings will be used.",
            path.display()
        );
        return (Settings::default(), None);
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read settings file: {}", e);
            return (Settings::default(), Some(ConfigError::Io(e)));
        }
    };

    let file: SettingsFile = match toml::from_str(&content) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to parse settings file: {}", e);
            return (Settings::default(), Some(ConfigError::Parse(e)));
        }
    };

    if let Err(e) = validate(&file) {
        warn!("Rejected settings file: {}", e);
        return (Settings::default(), Some(e));
    }

    if file.form.radius != file.form.radius.clamp(RADIUS_MIN, RADIUS_MAX) {
        warn!(
            "form.radius {} outside {}..={}, clamped",
            file.form.radius, RADIUS_MIN, RADIUS_MAX
        );
    }

    (Settings::from_file(file), None)
}
