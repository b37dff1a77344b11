//! Pixel buffer with half-block terminal output
//!
//! Each terminal cell shows two vertically stacked pixels using `▀` with the
//! foreground as the top pixel and the background as the bottom one.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};

use crate::platform::Viewport;
use crate::sim::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend from `a` to `b` by `t_256 / 256`
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    /// Same color, brighter by `amount`
    pub const fn lighten(self, amount: u8) -> Rgb {
        Rgb(
            self.0.saturating_add(amount),
            self.1.saturating_add(amount),
            self.2.saturating_add(amount),
        )
    }

    pub fn to_color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// Terminal-sized pixel grid (height = rows * 2)
#[derive(Debug, Clone)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Rgb(0, 0, 0));
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Fill a canvas-space rectangle, clipped to the canvas area
    pub fn fill_canvas(&mut self, vp: &Viewport, rect: Aabb, c: Rgb) {
        let (x0, y0, x1, y1) = pixel_span(vp, rect);
        self.fill_rect(x0, y0, x1 - x0, y1 - y0, c);
    }

    /// Queue the whole buffer as half-block cells (no flush)
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = None;
        let mut prev_bg = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if prev_bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.to_color()))?;
                    prev_bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(top.to_color()))?;
                        prev_fg = Some(top);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        queue!(out, style::ResetColor)
    }
}

/// Canvas rectangle -> clipped pixel span (x0, y0, x1, y1), end-exclusive
pub fn pixel_span(vp: &Viewport, rect: Aabb) -> (i32, i32, i32, i32) {
    let canvas = vp.canvas_rect_pixels();
    let min = vp.to_pixel(rect.pos);
    let max = vp.to_pixel(rect.pos + rect.size);
    let x0 = (min.x.round() as i32).max(canvas.0);
    let y0 = (min.y.round() as i32).max(canvas.1);
    let x1 = (max.x.round() as i32).min(canvas.2);
    let y1 = (max.y.round() as i32).min(canvas.3);
    (x0, y0, x1.max(x0), y1.max(y0))
}
