//! Canvas <-> terminal coordinate mapping
//!
//! The terminal is treated as a pixel grid of `cols × rows*2` (two half-block
//! pixels per cell). The logical canvas is scaled uniformly to fit and centered.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Terminal pixel grid size
    pub pixel_w: usize,
    pub pixel_h: usize,
    /// Terminal pixels per canvas unit
    pub scale: f32,
    /// Top-left of the canvas in terminal pixels
    pub offset: Vec2,
}

impl Viewport {
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        let pixel_w = cols as usize;
        let pixel_h = rows as usize * 2;
        let scale = (pixel_w as f32 / CANVAS_WIDTH).min(pixel_h as f32 / CANVAS_HEIGHT);
        let used = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) * scale;
        let offset = ((Vec2::new(pixel_w as f32, pixel_h as f32) - used) * 0.5).floor();
        Self {
            pixel_w,
            pixel_h,
            scale,
            offset,
        }
    }

    /// Canvas point -> terminal pixel
    pub fn to_pixel(&self, canvas: Vec2) -> Vec2 {
        self.offset + canvas * self.scale
    }

    /// Pixel span covered by the canvas (x0, y0, x1, y1), end-exclusive
    pub fn canvas_rect_pixels(&self) -> (i32, i32, i32, i32) {
        let max = self.to_pixel(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        (
            self.offset.x as i32,
            self.offset.y as i32,
            (max.x.round() as i32).min(self.pixel_w as i32),
            (max.y.round() as i32).min(self.pixel_h as i32),
        )
    }

    /// Terminal cell -> canvas point at the cell's center
    pub fn cell_to_canvas(&self, col: u16, row: u16) -> Vec2 {
        let pixel = Vec2::new(col as f32 + 0.5, row as f32 * 2.0 + 1.0);
        (pixel - self.offset) / self.scale.max(f32::EPSILON)
    }

    /// Canvas point -> terminal cell (column, row), clamped to the screen
    pub fn canvas_to_cell(&self, canvas: Vec2) -> (u16, u16) {
        let pixel = self.to_pixel(canvas);
        let col = pixel.x.clamp(0.0, self.pixel_w.saturating_sub(1) as f32) as u16;
        let row = (pixel.y / 2.0).clamp(0.0, (self.pixel_h / 2).saturating_sub(1) as f32) as u16;
        (col, row)
    }
}
