//! Small page effects: scroll reveal, card tilt and smooth scrolling.

/// Fraction of an element that must be on screen before it is revealed.
pub const REVEAL_THRESHOLD: f32 = 0.12;
/// Largest tilt around the horizontal axis, in degrees.
const TILT_X_DEG: f32 = 7.0;
/// Largest tilt around the vertical axis, in degrees.
const TILT_Y_DEG: f32 = 10.0;
/// Duration of an anchor scroll.
pub const SCROLL_DURATION_MS: f64 = 450.0;

/// Fraction of the rows `[top, top + height)` that fall inside the viewport
/// `[view_top, view_top + view_height)`.
pub fn visible_fraction(top: f32, height: f32, view_top: f32, view_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let start = top.max(view_top);
    let end = (top + height).min(view_top + view_height);
    ((end - start) / height).clamp(0.0, 1.0)
}

/// Whether an element with the given visible fraction should be revealed.
pub fn should_reveal(fraction: f32) -> bool {
    fraction >= REVEAL_THRESHOLD
}

/// Rotation of a hovered card, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Rotation around the horizontal axis.
    pub rx: f32,
    /// Rotation around the vertical axis.
    pub ry: f32,
}

impl Tilt {
    /// Tilt for a pointer at (`x`, `y`), each normalised to `[-0.5, 0.5]`
    /// relative to the card's center.
    pub fn from_pointer(x: f32, y: f32) -> Self {
        Self {
            rx: -y * TILT_X_DEG,
            ry: x * TILT_Y_DEG,
        }
    }

    /// Whole-cell shift used to draw the tilt: the card leans toward the
    /// pointer by at most one cell on each axis.
    pub fn cell_offset(self) -> (i32, i32) {
        let dx = (self.ry / (TILT_Y_DEG / 2.0)).round() as i32;
        let dy = (-self.rx / (TILT_X_DEG / 2.0)).round() as i32;
        (dx.clamp(-1, 1), dy.clamp(-1, 1))
    }
}

/// Section id an in-page link points at. A bare `#` or a link to another
/// page yields `None`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Eased scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
}

impl SmoothScroll {
    pub fn new(from: f32, to: f32, start_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: SCROLL_DURATION_MS,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Scroll offset at `now_ms`.
    pub fn position(&self, now_ms: f64) -> f32 {
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

/// Cubic ease-in-out on `[0, 1]`.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
