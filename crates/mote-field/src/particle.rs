//! Particle set creation.

use mote_core::Palette;
use rand::Rng;
use rand::distributions::Standard;

/// Spread of the hue jitter around the palette's base hue.
const HUE_JITTER: (f32, f32) = (-20.0, 40.0);

/// A point-mass drifting across the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in logical pixels.
    pub x: f32,
    /// Vertical position in logical pixels.
    pub y: f32,
    /// Horizontal velocity in logical pixels per 60fps frame.
    pub vx: f32,
    /// Vertical velocity in logical pixels per 60fps frame.
    pub vy: f32,
    /// Core radius, fixed for the particle's lifetime.
    pub r: f32,
    /// Decorative hue picked at creation.
    pub hue: f32,
}

/// Logical size of the area particles live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Create `count` particles spread uniformly over `bounds`.
///
/// Velocity components are uniform in `[-speed, speed]`, radii uniform in
/// `radius`, hues jittered around `hue`.
pub fn seed<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bounds: Bounds,
    speed: f32,
    radius: (f32, f32),
    hue: f32,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: between(rng, 0.0, bounds.width),
            y: between(rng, 0.0, bounds.height),
            vx: between(rng, -speed, speed),
            vy: between(rng, -speed, speed),
            r: between(rng, radius.0, radius.1),
            hue: hue + between(rng, HUE_JITTER.0, HUE_JITTER.1),
        })
        .collect()
}

/// Create a full particle set using the palette's parameters.
pub fn seed_for_palette<R: Rng + ?Sized>(
    rng: &mut R,
    palette: &Palette,
    bounds: Bounds,
) -> Vec<Particle> {
    seed(
        rng,
        palette.count,
        bounds,
        palette.speed,
        palette.radius_range(),
        palette.bg_hue,
    )
}

/// Uniform sample in `[min, max)`; a degenerate range yields `min`.
fn between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.sample::<f32, _>(Standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::Theme;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_seed_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bounds = Bounds::new(800.0, 600.0);
        let particles = seed(&mut rng, 500, bounds, 0.35, (0.8, 2.6), 210.0);
        assert_eq!(particles.len(), 500);
        for p in &particles {
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
            assert!((-0.35..=0.35).contains(&p.vx));
            assert!((-0.35..=0.35).contains(&p.vy));
            assert!((0.8..=2.6).contains(&p.r));
            assert!((190.0..=250.0).contains(&p.hue));
        }
    }

    #[test]
    fn test_zero_speed_does_not_panic() {
        let mut rng = SmallRng::seed_from_u64(1);
        let particles = seed(&mut rng, 10, Bounds::new(10.0, 10.0), 0.0, (1.0, 1.0), 0.0);
        assert!(particles.iter().all(|p| p.vx == 0.0 && p.vy == 0.0 && p.r == 1.0));
    }

    #[test]
    fn test_reseed_replaces() {
        let mut rng = SmallRng::seed_from_u64(3);
        let palette = Palette::for_theme(Theme::Light);
        let first = seed_for_palette(&mut rng, &palette, Bounds::new(300.0, 200.0));
        let second = seed_for_palette(&mut rng, &palette, Bounds::new(300.0, 200.0));
        assert_eq!(first.len(), palette.count);
        assert_eq!(second.len(), palette.count);
        assert_ne!(first, second);
        assert!(second.iter().all(|p| p.r <= 2.8));
    }
}
