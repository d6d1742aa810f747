mod tui;

use std::path::PathBuf;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Style, Styles};
use log::{info, warn};

use geotrigger_core::config::load_settings;
use geotrigger_core::constants::{CONFIG_PATH, LOG_PATH};
use geotrigger_core::logger::init_logger;
use geotrigger_core::utils::abbreviate_home_path;

#[derive(Parser, Debug)]
#[command(
    name = "geotrigger",
    version,
    styles = get_styles(),
    color = clap::ColorChoice::Always,
    about = "\x1b[1;33;4mOverview:\x1b[0m
  geotrigger is a terminal form for defining recurring geolocation triggers:
  when they repeat, whether they last all day, where on the map they sit,
  how large their radius is and how long a visit should last.",
    after_help = "\x1b[1;33;4mSettings:\x1b[0m
  Defaults are read from ~/.config/geotrigger/config.toml when present.

  [map]
  latitude = 51.0
  longitude = 7.0
  zoom = 15
  icons = \"unicode\"   # or \"ascii\"

  [form]
  radius = 100
  duration = 0
  time = \"15:00\"
"
)]
struct Cli {
    /// Settings file to read instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = init_logger(&LOG_PATH, cli.verbose) {
        eprintln!("File logging disabled: {e}");
    }

    let settings_path = cli.config.unwrap_or_else(|| CONFIG_PATH.clone());
    let (settings, settings_err) = load_settings(&settings_path);
    if let Some(ref e) = settings_err {
        warn!("Using default settings: {}", e);
    }

    info!(
        "Starting geotrigger {} (settings: {})",
        env!("CARGO_PKG_VERSION"),
        abbreviate_home_path(&settings_path)
    );

    tui::run(settings, &settings_path, settings_err)
}

fn get_styles() -> Styles {
    Styles::styled()
        .usage(AnsiColor::Yellow.on_default().bold().underline())
        .header(AnsiColor::Yellow.on_default().bold().underline())
        .literal(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
        .valid(AnsiColor::Green.on_default().bold().underline())
        .placeholder(Style::new().fg_color(Some(AnsiColor::White.into())))
}
