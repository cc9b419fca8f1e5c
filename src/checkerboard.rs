//! Checkerboard background shown through translucent colors.

use floem::context::PaintCx;
use floem::kurbo::Rect;
use floem_renderer::Renderer;

use crate::color::ArgbColor;
use crate::constants;

pub(crate) const LIGHT: ArgbColor = ArgbColor::from_argb(0xFFFF_FFFF);
pub(crate) const DARK: ArgbColor = ArgbColor::from_argb(0xFFCC_CCCC);

/// Checker color of raster pixel (`x`, `y`) for cells of `cell` pixels.
pub(crate) fn checker_at(x: u32, y: u32, cell: u32) -> ArgbColor {
    let cell = cell.max(1);
    if (x / cell + y / cell) % 2 == 1 {
        DARK
    } else {
        LIGHT
    }
}

/// Paint a checkerboard pattern into `rect`.
pub(crate) fn paint_checkerboard(cx: &mut PaintCx, rect: Rect) {
    let cell = constants::CHECKER_CELL;
    cx.fill(&rect, LIGHT.to_peniko(), 0.0);
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 1 {
                let x = rect.x0 + col as f64 * cell;
                let y = rect.y0 + row as f64 * cell;
                let cell_rect = Rect::new(x, y, (x + cell).min(rect.x1), (y + cell).min(rect.y1));
                cx.fill(&cell_rect, DARK.to_peniko(), 0.0);
            }
        }
    }
}
