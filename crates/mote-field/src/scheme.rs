//! Literal colors for each theme.

use mote_core::Theme;

use crate::color::Rgba;

/// A soft radial blob laid over the backdrop gradient.
///
/// Positions are fractions of the surface size; `reach` is a fraction of the
/// larger surface dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accent {
    pub inner: (f32, f32),
    pub outer: (f32, f32),
    pub reach: f32,
    pub from: Rgba,
    pub to: Rgba,
}

/// Every color the renderer uses for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheme {
    /// Page color behind the field and the reduced-motion fill.
    pub base: Rgba,
    /// Diagonal backdrop gradient, top-left to bottom-right.
    pub backdrop: (Rgba, Rgba),
    pub accents: &'static [Accent],
    /// Connection line color; alpha is computed per pair.
    pub line: Rgba,
    /// Particle glow, center to rim.
    pub glow: (Rgba, Rgba),
    /// Particle core color; alpha is computed per particle.
    pub core: Rgba,
}

static DARK: Scheme = Scheme {
    base: Rgba::new(5, 10, 18, 1.0),
    backdrop: (Rgba::new(6, 11, 22, 0.46), Rgba::new(2, 6, 23, 0.72)),
    accents: &[Accent {
        inner: (0.15, 0.1),
        outer: (0.25, 0.2),
        reach: 1.0,
        from: Rgba::new(124, 58, 237, 0.03),
        to: Rgba::new(6, 182, 212, 0.0),
    }],
    line: Rgba::new(120, 90, 230, 1.0),
    glow: (Rgba::new(124, 58, 237, 0.065), Rgba::new(6, 182, 212, 0.0)),
    core: Rgba::new(255, 255, 255, 1.0),
};

static LIGHT: Scheme = Scheme {
    base: Rgba::new(246, 245, 251, 1.0),
    backdrop: (Rgba::new(250, 250, 255, 0.5), Rgba::new(238, 236, 250, 0.72)),
    accents: &[
        Accent {
            inner: (0.2, 0.15),
            outer: (0.2, 0.15),
            reach: 0.45,
            from: Rgba::new(167, 139, 250, 0.06),
            to: Rgba::new(196, 181, 253, 0.0),
        },
        Accent {
            inner: (0.85, 0.8),
            outer: (0.85, 0.8),
            reach: 0.5,
            from: Rgba::new(196, 181, 253, 0.05),
            to: Rgba::new(221, 214, 254, 0.0),
        },
    ],
    line: Rgba::new(109, 40, 217, 1.0),
    glow: (Rgba::new(139, 92, 246, 0.07), Rgba::new(196, 181, 253, 0.0)),
    core: Rgba::new(59, 7, 100, 1.0),
};

impl Scheme {
    pub fn for_theme(theme: Theme) -> &'static Scheme {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}
