pub mod config;
pub mod constants;
pub mod draft;
pub mod geo;
pub mod logger;
pub mod saved;
pub mod trigger;
pub mod utils;
