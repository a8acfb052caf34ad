//! Painting the field onto a [`Surface`].

use mote_core::{Palette, Theme};

use crate::paint::{LinearGradient, Paint, RadialGradient};
use crate::particle::Particle;
use crate::scheme::Scheme;
use crate::surface::Surface;

/// Width of connection lines (logical px).
pub const LINE_WIDTH: f32 = 0.6;
/// Glow radius as a multiple of the core radius.
pub const GLOW_SCALE: f32 = 6.0;
const CORE_ALPHA_SCALE: f32 = 0.9;

/// Alpha of the line joining two particles `dist` apart.
pub fn connection_alpha(dist: f32, connection_dist: f32, max_alpha: f32) -> f32 {
    if dist >= connection_dist {
        return 0.0;
    }
    (1.0 - dist / connection_dist) * max_alpha
}

/// Alpha of a particle core of radius `r`.
pub fn core_alpha(r: f32, max_radius: f32, min_alpha: f32) -> f32 {
    min_alpha.max(r / max_radius * CORE_ALPHA_SCALE)
}

/// Call `f(i, j, dist)` for every unordered pair closer than
/// `connection_dist`.
///
/// This is a plain O(n²) scan; it is fine for the ~100 particles the field
/// uses but would need spatial buckets for much larger sets.
pub fn for_each_connection(
    particles: &[Particle],
    connection_dist: f32,
    mut f: impl FnMut(usize, usize, f32),
) {
    let limit = connection_dist * connection_dist;
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let d2 = dx * dx + dy * dy;
            if d2 < limit {
                f(i, j, d2.sqrt());
            }
        }
    }
}

/// Paint one full frame: backdrop, connections, then particles.
pub fn draw(surface: &mut Surface, particles: &[Particle], palette: &Palette) {
    let scheme = Scheme::for_theme(palette.theme);
    paint_backdrop(surface, scheme);

    for_each_connection(particles, palette.connection_dist, |i, j, dist| {
        let alpha = connection_alpha(dist, palette.connection_dist, palette.connection_alpha);
        let (a, b) = (&particles[i], &particles[j]);
        surface.stroke_line((a.x, a.y), (b.x, b.y), LINE_WIDTH, scheme.line.with_alpha(alpha));
    });

    for p in particles {
        let glow = RadialGradient::concentric((p.x, p.y), p.r * GLOW_SCALE, scheme.glow.0, scheme.glow.1);
        surface.fill_circle(p.x, p.y, p.r * GLOW_SCALE, &Paint::Radial(glow));

        let alpha = core_alpha(p.r, palette.max_radius, palette.dot_alpha_min);
        surface.fill_circle(p.x, p.y, p.r, &Paint::Solid(scheme.core.with_alpha(alpha)));
    }
}

/// Translucent backdrop gradient plus the theme's accent blobs.
fn paint_backdrop(surface: &mut Surface, scheme: &Scheme) {
    let (w, h) = surface.logical_size();
    surface.fill(&Paint::Linear(LinearGradient {
        start: (0.0, 0.0),
        end: (w, h),
        from: scheme.backdrop.0,
        to: scheme.backdrop.1,
    }));

    let extent = w.max(h);
    for accent in scheme.accents {
        surface.fill(&Paint::Radial(RadialGradient {
            inner: (w * accent.inner.0, h * accent.inner.1),
            inner_radius: 0.0,
            outer: (w * accent.outer.0, h * accent.outer.1),
            outer_radius: extent * accent.reach,
            from: accent.from,
            to: accent.to,
        }));
    }
}

/// Opaque full-bleed fill in the theme's base color, used instead of the
/// animation when motion is reduced.
pub fn paint_static(surface: &mut Surface, theme: Theme) {
    surface.fill(&Paint::Solid(Scheme::for_theme(theme).base));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn at(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            r: 2.0,
            hue: 210.0,
        }
    }

    #[test]
    fn test_connection_alpha_bounds() {
        assert_eq!(connection_alpha(120.0, 120.0, 0.11), 0.0);
        assert_eq!(connection_alpha(500.0, 120.0, 0.11), 0.0);
        assert!((connection_alpha(0.0, 120.0, 0.11) - 0.11).abs() < 1e-6);
        assert!((connection_alpha(60.0, 120.0, 0.11) - 0.055).abs() < 1e-6);
    }

    #[test]
    fn test_connection_alpha_monotonic() {
        let mut last = f32::INFINITY;
        for d in 0..=130 {
            let a = connection_alpha(d as f32, 120.0, 0.13);
            assert!(a <= last);
            last = a;
        }
    }

    #[test]
    fn test_core_alpha_floor() {
        assert_eq!(core_alpha(0.8, 2.6, 0.42), 0.42);
        assert!((core_alpha(2.6, 2.6, 0.42) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_connections_are_unordered_pairs() {
        let particles = [at(0.0, 0.0), at(100.0, 0.0), at(300.0, 0.0), at(0.0, 119.0)];
        let mut pairs = Vec::new();
        for_each_connection(&particles, 120.0, |i, j, d| pairs.push((i, j, d)));
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].0, pairs[0].1), (0, 1));
        assert!((pairs[0].2 - 100.0).abs() < 1e-4);
        assert_eq!((pairs[1].0, pairs[1].1), (0, 3));
    }

    #[test]
    fn test_draw_lights_particles() {
        let base = Scheme::for_theme(Theme::Dark).base.opaque();
        let mut surface = Surface::new(40, 40, 0.25, base).unwrap();
        let palette = Palette::for_theme(Theme::Dark);
        draw(&mut surface, &[at(82.0, 82.0)], &palette);
        let lit = surface.pixel(20, 20).unwrap();
        let dark = surface.pixel(2, 37).unwrap();
        assert!(lit.r > dark.r + 50.0);
    }

    #[test]
    fn test_light_core_is_dark() {
        let base = Scheme::for_theme(Theme::Light).base.opaque();
        let mut surface = Surface::new(40, 40, 0.25, base).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        draw(&mut surface, &[at(82.0, 82.0)], &palette);
        let core = surface.pixel(20, 20).unwrap();
        let page = surface.pixel(2, 37).unwrap();
        assert!(core.g < page.g - 50.0);
    }

    #[test]
    fn test_static_fill_is_opaque() {
        let mut surface = Surface::new(4, 4, 1.0, Rgb::default()).unwrap();
        paint_static(&mut surface, Theme::Dark);
        assert_eq!(surface.pixel(3, 3), Some(Scheme::for_theme(Theme::Dark).base.opaque()));
    }
}
