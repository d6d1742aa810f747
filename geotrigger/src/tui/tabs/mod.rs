pub mod config;
pub mod home;

pub use config::ConfigState;
use crossterm::event::KeyCode;
pub use home::HomeState;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Tab {
    Home,
    Config,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Config => "Config",
        }
    }

    pub fn superscript(&self) -> &'static str {
        match self {
            Tab::Home => "¹",
            Tab::Config => "²",
        }
    }

    pub fn key(&self) -> KeyCode {
        match self {
            Tab::Home => KeyCode::Char('1'),
            Tab::Config => KeyCode::Char('2'),
        }
    }

    pub fn from_key(key: KeyCode) -> Option<Tab> {
        Tab::iter().find(|tab| tab.key() == key)
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Home => Tab::Config,
            Tab::Config => Tab::Home,
        }
    }

    pub fn previous(self) -> Self {
        self.next()
    }
}
