//! Persisted light/dark preference.

use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use log::info;
use mote_core::{Palette, Theme};

use crate::Config;

/// Reads, applies and persists the theme preference.
///
/// The store is the only place a [`Palette`] gets replaced after startup.
#[derive(Debug)]
pub struct ThemeStore {
    /// Config file holding the `theme` key; `None` disables persistence.
    path: Option<PathBuf>,
    /// Theme most recently applied.
    applied: Theme,
}

impl ThemeStore {
    /// Create a store backed by the config file at `path`, with the persisted
    /// theme already applied.
    pub fn new(path: Option<PathBuf>) -> Self {
        let mut store = Self {
            path,
            applied: Theme::default(),
        };
        store.applied = store.get_theme();
        store
    }

    /// Persisted preference, or dark when unset, invalid or unreadable.
    pub fn get_theme(&self) -> Theme {
        Config::load_or_default(self.path.as_deref()).theme()
    }

    /// Theme most recently applied.
    pub fn applied(&self) -> Theme {
        self.applied
    }

    /// Apply `theme`, returning the fully derived palette for it.
    pub fn apply_theme(&mut self, theme: Theme, count: usize) -> Palette {
        self.applied = theme;
        Palette::with_count(theme, count)
    }

    /// Flip the applied theme, replace `palette` with the derived one and
    /// persist the new preference.
    ///
    /// The palette is replaced even if persisting fails.
    pub fn toggle_theme(&mut self, palette: &mut Palette) -> color_eyre::Result<Theme> {
        let next = self.applied.toggle();
        *palette = self.apply_theme(next, palette.count);
        info!("theme switched to {next}");
        self.persist(next)?;
        Ok(next)
    }

    /// Write `theme` into the config file, keeping every other key.
    fn persist(&self, theme: Theme) -> color_eyre::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        // A file that does not parse is left alone rather than replaced
        // with defaults.
        let mut config = Config::load_from(path)
            .wrap_err("theme preference not saved; fix the config file first")?;
        config.theme = Some(theme.as_str().to_string());
        config.save_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::scratch_path;

    #[test]
    fn test_unpersisted_store_defaults_dark() {
        let store = ThemeStore::new(None);
        assert_eq!(store.get_theme(), Theme::Dark);
        assert_eq!(store.applied(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let path = scratch_path("toggle");
        let mut store = ThemeStore::new(Some(path.clone()));
        let mut palette = store.apply_theme(store.get_theme(), 100);
        assert_eq!(palette.theme, Theme::Dark);

        let theme = store.toggle_theme(&mut palette).unwrap();
        assert_eq!(theme, Theme::Light);
        assert_eq!(palette, Palette::for_theme(Theme::Light));
        assert_eq!(store.get_theme(), Theme::Light);
        assert_eq!(ThemeStore::new(Some(path)).applied(), Theme::Light);
    }

    #[test]
    fn test_toggle_keeps_other_keys() {
        let path = scratch_path("toggle-keeps");
        let config = Config {
            fps: 24,
            reduced_motion: true,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let mut store = ThemeStore::new(Some(path.clone()));
        let mut palette = Palette::default();
        store.toggle_theme(&mut palette).unwrap();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.fps, 24);
        assert!(saved.reduced_motion);
        assert_eq!(saved.theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_leaves_malformed_file_alone() {
        let path = scratch_path("toggle-malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let original = "fps = \"fast\"\nparticle_count = 40\nreduced_motion = true\n";
        std::fs::write(&path, original).unwrap();

        let mut store = ThemeStore::new(Some(path.clone()));
        let mut palette = Palette::default();
        assert!(store.toggle_theme(&mut palette).is_err());
        // The new theme is applied even though it could not be saved.
        assert_eq!(palette.theme, Theme::Light);
        assert_eq!(store.applied(), Theme::Light);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut store = ThemeStore::new(None);
        let original = store.apply_theme(Theme::Dark, 80);
        let mut palette = original;
        store.toggle_theme(&mut palette).unwrap();
        store.toggle_theme(&mut palette).unwrap();
        assert_eq!(palette, original);
        assert_eq!(store.applied(), Theme::Dark);
    }
}
