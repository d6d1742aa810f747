use crate::utils::expand_tilde;
use log::error;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::process;

pub const APP_NAME: &str = "geotrigger";

/// Radius bounds of a trigger ring, in meters.
pub const RADIUS_MIN: u16 = 15;
pub const RADIUS_MAX: u16 = 200;
pub const DEFAULT_RADIUS: u16 = 100;

pub const DEFAULT_LATITUDE: f64 = 51.0;
pub const DEFAULT_LONGITUDE: f64 = 7.0;
pub const DEFAULT_TIME: &str = "15:00";

/// Map zoom levels follow slippy-map numbering.
pub const ZOOM_MIN: u8 = 1;
pub const ZOOM_MAX: u8 = 18;
pub const DEFAULT_ZOOM: u8 = 15;

/// Wire formats for dates and times of day.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub static CONFIG_PATH: Lazy<PathBuf> =
    Lazy::new(|| expand_tilde("~/.config/geotrigger/config.toml"));

pub static LOG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(APP_NAME)
        .join("geotrigger.log")
});

pub static HOME_DIR: Lazy<PathBuf> = Lazy::new(|| match dirs::home_dir() {
    Some(path) => path,
    None => {
        error!("HOME environment variable is not set.");
        process::exit(1);
    }
});
