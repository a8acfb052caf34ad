//! Mouse-reactive particle field for the mote landing page.
//!
//! The field is a fixed set of drifting particles that wrap around the
//! screen edges, get pushed away from the pointer and are joined by faint
//! lines when close. Everything is simulated in logical pixels and
//! rasterized onto a device-resolution [`Surface`], which [`SurfaceView`]
//! presents with half-block glyphs.

mod clock;
mod color;
mod paint;
mod particle;
mod pointer;
mod render;
mod scheme;
mod simulation;
mod state;
mod surface;
mod view;

pub use clock::{FrameClock, FrameTick, time_scale};
pub use color::{Rgb, Rgba, hsl_to_rgb};
pub use particle::{Bounds, Particle};
pub use pointer::{Pointer, PointerTracker};
pub use render::{connection_alpha, core_alpha};
pub use scheme::{Accent, Scheme};
pub use state::FieldState;
pub use surface::Surface;
pub use view::{SurfaceView, device_size};
