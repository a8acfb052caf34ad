//! Configuration file and theme preference storage for mote.

mod config;
mod theme;

pub use config::Config;
pub use theme::ThemeStore;
