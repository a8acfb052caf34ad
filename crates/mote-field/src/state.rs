//! Field state: the particle set and the surface it is drawn on.

use log::{debug, info};
use mote_core::Palette;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::clock::FrameTick;
use crate::particle::{Bounds, Particle, seed_for_palette};
use crate::pointer::Pointer;
use crate::render;
use crate::scheme::Scheme;
use crate::simulation;
use crate::surface::Surface;

/// Owns the particles and the surface; nothing outside reads or mutates the
/// particles directly.
#[derive(Debug)]
pub struct FieldState {
    particles: Vec<Particle>,
    surface: Surface,
    /// Reduced motion: no particles, one static fill, no further painting.
    frozen: bool,
    rng: SmallRng,
}

impl FieldState {
    /// Start a field on `surface`, seeded from entropy.
    pub fn new(surface: Surface, palette: &Palette, reduced_motion: bool) -> Self {
        Self::with_rng(surface, palette, reduced_motion, SmallRng::from_entropy())
    }

    /// Start a field with an explicit random source.
    pub fn with_rng(
        surface: Surface,
        palette: &Palette,
        reduced_motion: bool,
        rng: SmallRng,
    ) -> Self {
        let mut state = Self {
            particles: Vec::new(),
            surface,
            frozen: reduced_motion,
            rng,
        };
        if reduced_motion {
            info!("reduced motion: painting a static background");
        }
        state.reseed(palette);
        state
    }

    /// Logical bounds particles wrap around.
    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.surface.logical_size();
        Bounds::new(width, height)
    }

    /// Replace the whole particle set. In reduced motion the set stays empty
    /// and the static fill is repainted instead.
    pub fn reseed(&mut self, palette: &Palette) {
        if self.frozen {
            self.particles.clear();
            render::paint_static(&mut self.surface, palette.theme);
            return;
        }
        let bounds = self.bounds();
        self.particles = seed_for_palette(&mut self.rng, palette, bounds);
        debug!(
            "seeded {} particles in {:.0}x{:.0}",
            self.particles.len(),
            bounds.width,
            bounds.height
        );
    }

    /// Follow a change of device size or pixel ratio; reseeds when the
    /// surface was reallocated.
    pub fn resize(&mut self, width: usize, height: usize, ratio: f32, palette: &Palette) -> bool {
        let base = Scheme::for_theme(palette.theme).base.opaque();
        if !self.surface.resize(width, height, ratio, base) {
            return false;
        }
        debug!("surface resized to {width}x{height} device px at ratio {ratio}");
        self.reseed(palette);
        true
    }

    /// Step the simulation and paint one frame.
    pub fn advance(&mut self, palette: &Palette, pointer: Option<Pointer>, tick: FrameTick) {
        if self.frozen {
            return;
        }
        let bounds = self.bounds();
        simulation::step(
            &mut self.particles,
            pointer,
            tick.scale,
            bounds,
            tick.time_secs,
        );
        render::draw(&mut self.surface, &self.particles, palette);
    }

    /// React to a theme switch. The animated field picks the new palette up
    /// on its next frame; the static fill has to be repainted.
    pub fn set_palette(&mut self, palette: &Palette) {
        if self.frozen {
            render::paint_static(&mut self.surface, palette.theme);
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}
