//! Core types shared by the mote crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of particles in the field.
pub const DEFAULT_PARTICLE_COUNT: usize = 100;
/// Pairs closer than this (logical px) are joined by a line.
pub const CONNECTION_DISTANCE: f32 = 120.0;
/// Upper bound of each initial velocity component.
pub const BASE_SPEED: f32 = 0.35;
/// Smallest radius a particle can be seeded with.
pub const MIN_RADIUS: f32 = 0.8;

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Key used when persisting the preference.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a persisted value, falling back to [`Theme::Dark`] when it is
    /// missing or not one of the known keys.
    pub fn from_preference(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a theme key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Every numeric parameter of the field that depends on the active theme.
///
/// A palette is always derived as a whole from a [`Theme`]; there is no way to
/// change one field without re-deriving the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Theme this palette was derived from.
    pub theme: Theme,
    /// Number of particles seeded into the field.
    pub count: usize,
    /// Largest particle radius (logical px).
    pub max_radius: f32,
    /// Distance under which two particles are connected.
    pub connection_dist: f32,
    /// Bound of the initial velocity components.
    pub speed: f32,
    /// Base hue particles are jittered around.
    pub bg_hue: f32,
    /// Alpha of a connection line between two coincident particles.
    pub connection_alpha: f32,
    /// Lowest alpha of a particle core.
    pub dot_alpha_min: f32,
}

impl Palette {
    /// Derive the palette for `theme` with the default particle count.
    pub fn for_theme(theme: Theme) -> Self {
        Self::with_count(theme, DEFAULT_PARTICLE_COUNT)
    }

    /// Derive the palette for `theme` with an explicit particle count.
    pub fn with_count(theme: Theme, count: usize) -> Self {
        let (bg_hue, max_radius, connection_alpha, dot_alpha_min) = match theme {
            Theme::Dark => (210.0, 2.6, 0.11, 0.42),
            Theme::Light => (265.0, 2.8, 0.13, 0.35),
        };
        Self {
            theme,
            count,
            max_radius,
            connection_dist: CONNECTION_DISTANCE,
            speed: BASE_SPEED,
            bg_hue,
            connection_alpha,
            dot_alpha_min,
        }
    }

    /// Seeding range for particle radii.
    pub fn radius_range(&self) -> (f32, f32) {
        (MIN_RADIUS, self.max_radius)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
