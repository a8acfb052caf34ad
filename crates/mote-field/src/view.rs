//! Presenting a [`Surface`] in a terminal buffer.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::surface::Surface;

/// Glyph whose foreground paints the top half of a cell.
const UPPER_HALF: char = '▀';

/// Widget drawing a surface with two device pixels per cell: the upper one as
/// the foreground of a half-block glyph, the lower one as the background.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    surface: &'a Surface,
}

impl<'a> SurfaceView<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self { surface }
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as usize, row as usize * 2);
                let (Some(top), Some(bottom)) =
                    (self.surface.pixel(x, y), self.surface.pixel(x, y + 1))
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(UPPER_HALF).set_fg(top.into()).set_bg(bottom.into());
                }
            }
        }
    }
}

/// Device pixel size backing a terminal area.
pub fn device_size(area: Rect) -> (usize, usize) {
    (area.width as usize, area.height as usize * 2)
}
