//! Fill styles: solid colors and two-stop gradients.

use crate::color::Rgba;

/// A point in logical coordinates.
pub type Point = (f32, f32);

/// Gradient along the line from `start` to `end`, padded beyond both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub from: Rgba,
    pub to: Rgba,
}

impl LinearGradient {
    pub fn sample(&self, x: f32, y: f32) -> Rgba {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        let len2 = dx * dx + dy * dy;
        if len2 <= f32::EPSILON {
            return self.to;
        }
        let t = ((x - self.start.0) * dx + (y - self.start.1) * dy) / len2;
        self.from.lerp(self.to, t)
    }
}

/// Two-circle radial gradient.
///
/// The color of a point comes from the largest `ω` for which the point lies
/// on the circle interpolated between the inner and outer circles with a
/// non-negative radius. Points on no such circle are left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub inner: Point,
    pub inner_radius: f32,
    pub outer: Point,
    pub outer_radius: f32,
    pub from: Rgba,
    pub to: Rgba,
}

impl RadialGradient {
    /// Gradient between two circles sharing a center.
    pub fn concentric(center: Point, radius: f32, from: Rgba, to: Rgba) -> Self {
        Self {
            inner: center,
            inner_radius: 0.0,
            outer: center,
            outer_radius: radius,
            from,
            to,
        }
    }

    pub fn sample(&self, x: f32, y: f32) -> Option<Rgba> {
        self.omega(x, y).map(|w| self.from.lerp(self.to, w))
    }

    fn omega(&self, x: f32, y: f32) -> Option<f32> {
        let (r0, dr) = (self.inner_radius, self.outer_radius - self.inner_radius);
        let cdx = self.outer.0 - self.inner.0;
        let cdy = self.outer.1 - self.inner.1;
        let pdx = x - self.inner.0;
        let pdy = y - self.inner.1;

        let a = cdx * cdx + cdy * cdy - dr * dr;
        let b = pdx * cdx + pdy * cdy + r0 * dr;
        let c = pdx * pdx + pdy * pdy - r0 * r0;
        let valid = |w: f32| r0 + w * dr >= 0.0;

        if a.abs() <= f32::EPSILON {
            if b.abs() <= f32::EPSILON {
                return None;
            }
            let w = c / (2.0 * b);
            return valid(w).then_some(w);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let (w1, w2) = ((b + root) / a, (b - root) / a);
        let (hi, lo) = if w1 >= w2 { (w1, w2) } else { (w2, w1) };
        if valid(hi) {
            Some(hi)
        } else if valid(lo) {
            Some(lo)
        } else {
            None
        }
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Color at a logical point, or `None` where the paint is undefined.
    pub fn sample(&self, x: f32, y: f32) -> Option<Rgba> {
        match self {
            Paint::Solid(color) => Some(*color),
            Paint::Linear(gradient) => Some(gradient.sample(x, y)),
            Paint::Radial(gradient) => gradient.sample(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgba = Rgba::new(0, 0, 0, 0.0);
    const B: Rgba = Rgba::new(200, 100, 0, 1.0);

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-3 && (a.a - b.a).abs() < 1e-4
    }

    #[test]
    fn test_linear_pads_and_interpolates() {
        let g = LinearGradient {
            start: (0.0, 0.0),
            end: (100.0, 0.0),
            from: A,
            to: B,
        };
        assert!(close(g.sample(-50.0, 7.0), A));
        assert!(close(g.sample(150.0, -3.0), B));
        assert!(close(g.sample(50.0, 40.0), A.lerp(B, 0.5)));
    }

    #[test]
    fn test_concentric_radial() {
        let g = RadialGradient::concentric((10.0, 10.0), 20.0, A, B);
        assert!(close(g.sample(10.0, 10.0).unwrap(), A));
        assert!(close(g.sample(20.0, 10.0).unwrap(), A.lerp(B, 0.5)));
        assert!(close(g.sample(10.0, 40.0).unwrap(), B));
    }

    #[test]
    fn test_offset_radial_covers_inside_outer_circle() {
        let g = RadialGradient {
            inner: (15.0, 10.0),
            inner_radius: 0.0,
            outer: (25.0, 20.0),
            outer_radius: 100.0,
            from: A,
            to: B,
        };
        // The inner point is the start of the gradient.
        assert!(close(g.sample(15.0, 10.0).unwrap(), A));
        // Every point inside the outer circle has a color.
        for &(x, y) in &[(0.0, 0.0), (100.0, 20.0), (25.0, 110.0)] {
            let c = g.sample(x, y).unwrap();
            assert!(c.a >= 0.0 && c.a <= 1.0);
        }
    }

    #[test]
    fn test_radial_outside_cone_is_undefined() {
        // Inner circle far from a small outer circle: the cone does not reach
        // points on the opposite side.
        let g = RadialGradient {
            inner: (0.0, 0.0),
            inner_radius: 1.0,
            outer: (100.0, 0.0),
            outer_radius: 1.0,
            from: A,
            to: B,
        };
        assert!(g.sample(50.0, 50.0).is_none());
        assert!(g.sample(50.0, 0.5).is_some());
    }
}
