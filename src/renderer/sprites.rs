//! Procedural sprites
//!
//! Everything is drawn from rectangles in canvas space, so the look scales
//! with the terminal. Colors depend on the entity kind and its skin.

use glam::Vec2;

use super::canvas::{PixelBuf, Rgb};
use crate::Result;
use crate::consts::*;
use crate::platform::{AnimationCycle, Viewport};
use crate::sim::{Aabb, Entity, EntityKind, Player, TimeOfDay};

// ── Palette ─────────────────────────────────────────────────────────────────

pub const DAY_SKY_TOP: Rgb = Rgb(70, 180, 200);
pub const DAY_SKY_BOT: Rgb = Rgb(190, 232, 245);
pub const NIGHT_SKY_TOP: Rgb = Rgb(10, 20, 50);
pub const NIGHT_SKY_BOT: Rgb = Rgb(40, 70, 110);
const DAY_SKYLINE: Rgb = Rgb(150, 205, 185);
const NIGHT_SKYLINE: Rgb = Rgb(30, 50, 80);
const NIGHT_WINDOW: Rgb = Rgb(230, 210, 120);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const DAY_PIPE: Rgb = Rgb(100, 170, 40);
const DAY_PIPE_CAP: Rgb = Rgb(74, 122, 26);
const NIGHT_PIPE: Rgb = Rgb(190, 70, 50);
const NIGHT_PIPE_CAP: Rgb = Rgb(140, 40, 30);
const COIN: Rgb = Rgb(250, 200, 40);
const COIN_SHINE: Rgb = Rgb(255, 240, 150);
const EYE: Rgb = Rgb(255, 255, 255);
const PUPIL: Rgb = Rgb(20, 20, 20);
const BEAK: Rgb = Rgb(225, 75, 35);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const SHADOW: Rgb = Rgb(30, 30, 30);

/// Body color of a cosmetic variant
pub fn variant_color(variant: &str) -> Rgb {
    match variant {
        "blue" => Rgb(80, 150, 235),
        "red" => Rgb(230, 70, 60),
        _ => Rgb(245, 200, 66),
    }
}

pub fn sky_colors(skin: TimeOfDay) -> (Rgb, Rgb) {
    match skin {
        TimeOfDay::Day => (DAY_SKY_TOP, DAY_SKY_BOT),
        TimeOfDay::Night => (NIGHT_SKY_TOP, NIGHT_SKY_BOT),
    }
}

// ── Player wing animation ───────────────────────────────────────────────────

/// Wing position for one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WingPose {
    Up,
    Mid,
    Down,
}

impl WingPose {
    /// Vertical offset of the wing inside the body, canvas units
    fn offset(self) -> f32 {
        match self {
            WingPose::Up => 4.0,
            WingPose::Mid => 9.0,
            WingPose::Down => 14.0,
        }
    }
}

/// Frame sets the presenter needs
#[derive(Debug, Clone)]
pub struct Sprites {
    pub wing: AnimationCycle<WingPose>,
}

impl Sprites {
    pub fn load() -> Result<Self> {
        Ok(Self {
            wing: AnimationCycle::new(
                "player/wing",
                vec![WingPose::Up, WingPose::Mid, WingPose::Down, WingPose::Mid],
            )?,
        })
    }
}

// ── Drawing ────────────────────────────────────────────────────────────────

/// Sky gradient over the whole canvas
pub fn draw_sky(buf: &mut PixelBuf, vp: &Viewport, skin: TimeOfDay) {
    let (top, bot) = sky_colors(skin);
    let (x0, y0, x1, y1) = vp.canvas_rect_pixels();
    let h = (y1 - y0).max(1);
    for y in y0..y1 {
        let t = ((y - y0) * 256 / h) as u16;
        let c = Rgb::lerp(top, bot, t);
        for x in x0..x1 {
            buf.set(x, y, c);
        }
    }
}

/// Draw an entity according to its kind
pub fn draw_entity(buf: &mut PixelBuf, vp: &Viewport, entity: &Entity) {
    match entity.kind {
        EntityKind::Backdrop => draw_skyline(buf, vp, entity),
        EntityKind::Ground => draw_ground(buf, vp, entity),
        EntityKind::UpperObstacle => draw_obstacle(buf, vp, entity, true),
        EntityKind::LowerObstacle => draw_obstacle(buf, vp, entity, false),
        EntityKind::Bonus => draw_coin(buf, vp, entity.bounds),
    }
}

/// Building silhouettes along the bottom of a backdrop tile
fn draw_skyline(buf: &mut PixelBuf, vp: &Viewport, tile: &Entity) {
    // (x offset within tile, width, height)
    const BUILDINGS: [(f32, f32, f32); 7] = [
        (0.0, 30.0, 50.0),
        (34.0, 24.0, 80.0),
        (62.0, 40.0, 40.0),
        (110.0, 28.0, 95.0),
        (150.0, 36.0, 60.0),
        (196.0, 22.0, 75.0),
        (230.0, 50.0, 45.0),
    ];
    let color = match tile.skin {
        TimeOfDay::Day => DAY_SKYLINE,
        TimeOfDay::Night => NIGHT_SKYLINE,
    };
    for &(dx, w, h) in &BUILDINGS {
        let rect = Aabb::new(tile.x() + dx, GROUND_Y - h, w, h);
        buf.fill_canvas(vp, rect, color);
        if tile.skin == TimeOfDay::Night {
            let window = Aabb::new(rect.left() + w * 0.3, rect.top() + 8.0, 4.0, 4.0);
            buf.fill_canvas(vp, window, NIGHT_WINDOW);
        }
    }
}

fn draw_ground(buf: &mut PixelBuf, vp: &Viewport, tile: &Entity) {
    let b = tile.bounds;
    buf.fill_canvas(vp, b, DIRT);
    // Diagonal-ish stripes tied to the tile so they scroll with it
    let mut x = b.left();
    while x < b.right() {
        buf.fill_canvas(vp, Aabb::new(x, b.top() + 14.0, 12.0, b.size.y), DIRT_DARK);
        x += 24.0;
    }
    buf.fill_canvas(vp, Aabb::new(b.left(), b.top(), b.size.x, 12.0), GRASS);
    let mut x = b.left();
    while x < b.right() {
        buf.fill_canvas(vp, Aabb::new(x, b.top(), 6.0, 4.0), GRASS_LIGHT);
        x += 12.0;
    }
}

fn draw_obstacle(buf: &mut PixelBuf, vp: &Viewport, entity: &Entity, upper: bool) {
    let (body, cap) = match entity.skin {
        TimeOfDay::Day => (DAY_PIPE, DAY_PIPE_CAP),
        TimeOfDay::Night => (NIGHT_PIPE, NIGHT_PIPE_CAP),
    };
    let b = entity.bounds;
    buf.fill_canvas(vp, b, body);
    // Highlight stripe
    buf.fill_canvas(vp, Aabb::new(b.left() + 8.0, b.top(), 6.0, b.size.y), body.lighten(40));
    // Cap faces the gap
    let cap_h = 24.0;
    let cap_y = if upper { b.bottom() - cap_h } else { b.top() };
    buf.fill_canvas(vp, Aabb::new(b.left() - 2.0, cap_y, b.size.x + 4.0, cap_h), cap);
}

fn draw_coin(buf: &mut PixelBuf, vp: &Viewport, b: Aabb) {
    let inset = b.size * 0.2;
    // Rough disc: a cross of two rectangles
    buf.fill_canvas(vp, Aabb::new(b.left() + inset.x, b.top(), b.size.x - 2.0 * inset.x, b.size.y), COIN);
    buf.fill_canvas(vp, Aabb::new(b.left(), b.top() + inset.y, b.size.x, b.size.y - 2.0 * inset.y), COIN);
    buf.fill_canvas(vp, Aabb::new(b.left() + inset.x, b.top() + inset.y, 4.0, 4.0), COIN_SHINE);
}

/// Player body, eye, beak and the wing for the current animation frame
pub fn draw_player(buf: &mut PixelBuf, vp: &Viewport, player: &Player, sprites: &Sprites) {
    let b = player.bounds;
    let body = variant_color(&player.variant);
    buf.fill_canvas(vp, b, body);

    let pose = *sprites.wing.frame(player.anim_frame(sprites.wing.len()));
    let wing = Aabb::new(b.left() + 2.0, b.top() + pose.offset(), 14.0, 8.0);
    buf.fill_canvas(vp, wing, Rgb::lerp(body, SHADOW, 60));

    let eye = Aabb::new(b.right() - 12.0, b.top() + 3.0, 9.0, 9.0);
    buf.fill_canvas(vp, eye, EYE);
    buf.fill_canvas(vp, Aabb::new(eye.right() - 4.0, eye.top() + 3.0, 3.0, 4.0), PUPIL);

    let beak = Aabb::new(b.right() - 6.0, b.top() + 13.0, 10.0, 7.0);
    buf.fill_canvas(vp, beak, BEAK);
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// Draw `n` centered on `center_x`, each digit cell `cell` canvas units square
pub fn draw_number(buf: &mut PixelBuf, vp: &Viewport, center_x: f32, top: f32, n: u32, cell: f32) {
    let text = n.to_string();
    let total_w = (text.len() as f32 * 4.0 - 1.0) * cell;
    let start_x = center_x - total_w / 2.0;
    for (i, ch) in text.bytes().enumerate() {
        let glyph = &DIGITS[(ch - b'0') as usize];
        let gx = start_x + i as f32 * 4.0 * cell;
        for row in 0..5 {
            for col in 0..3 {
                if glyph[row * 3 + col] == 1 {
                    let pos = Vec2::new(gx + col as f32 * cell, top + row as f32 * cell);
                    buf.fill_canvas(vp, Aabb::new(pos.x + 1.5, pos.y + 1.5, cell, cell), SHADOW);
                    buf.fill_canvas(vp, Aabb::new(pos.x, pos.y, cell, cell), WHITE);
                }
            }
        }
    }
}
