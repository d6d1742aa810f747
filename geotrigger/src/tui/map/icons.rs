use log::{debug, info};
use once_cell::sync::OnceCell;

use geotrigger_core::config::IconStyle;

/// Glyphs drawn for the position marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcons {
    pub style: IconStyle,
    pub marker: &'static str,
    pub shadow: &'static str,
}

impl MarkerIcons {
    pub fn for_style(style: IconStyle) -> Self {
        match style {
            IconStyle::Unicode => Self {
                style,
                marker: "◉",
                shadow: "░",
            },
            IconStyle::Ascii => Self {
                style,
                marker: "@",
                shadow: ".",
            },
        }
    }
}

static ICONS: OnceCell<MarkerIcons> = OnceCell::new();

/// Installs the process-wide marker glyphs. Only the first call has an
/// effect; later calls return the set already installed.
pub fn install_default_icons(style: IconStyle) -> &'static MarkerIcons {
    let icons = ICONS.get_or_init(|| {
        info!("Installing {:?} marker icons", style);
        MarkerIcons::for_style(style)
    });
    if icons.style != style {
        debug!(
            "Marker icons already installed as {:?}, ignoring {:?}",
            icons.style, style
        );
    }
    icons
}

/// The installed glyphs, installing the default set on first use. Called
/// every frame, so it never compares styles.
pub fn default_icons() -> &'static MarkerIcons {
    ICONS.get_or_init(|| MarkerIcons::for_style(IconStyle::default()))
}
