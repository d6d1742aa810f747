use std::path::Path;

use geotrigger_core::utils::abbreviate_home_path;

#[derive(Debug)]
pub struct HomeState {
    pub settings_path: String,
}

impl HomeState {
    pub fn new(settings_path: &Path) -> Self {
        Self {
            settings_path: abbreviate_home_path(settings_path),
        }
    }
}
