//! Last known pointer position.

/// Pointer position in logical viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

/// Tracks where the mouse (or a dragging touch) last was.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Option<Pointer>,
    /// Timestamp of the last move, in frame-clock milliseconds.
    last_move_ms: f64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move at `now_ms`.
    pub fn move_to(&mut self, x: f32, y: f32, now_ms: f64) {
        self.position = Some(Pointer { x, y });
        self.last_move_ms = now_ms;
    }

    /// Forget the position, e.g. when the pointer leaves the window.
    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Pointer> {
        self.position
    }

    pub fn last_move_ms(&self) -> f64 {
        self.last_move_ms
    }

    /// Position to feed the simulation at `now_ms`. With a non-zero
    /// `timeout_ms` a pointer idle for longer counts as absent.
    pub fn active(&self, now_ms: f64, timeout_ms: u64) -> Option<Pointer> {
        let position = self.position?;
        if timeout_ms > 0 && now_ms - self.last_move_ms > timeout_ms as f64 {
            return None;
        }
        Some(position)
    }
}
