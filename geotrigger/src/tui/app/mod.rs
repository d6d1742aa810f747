pub mod events;
pub mod render;
pub mod state;

pub use state::App;
