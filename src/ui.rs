//! On-screen controls
//!
//! Control rectangles live in canvas space so the simulation can hit-test
//! pointer input without knowing how the frame is presented.

use glam::Vec2;

use crate::progression::VARIANTS;
use crate::sim::Mode;
use crate::sim::aabb::Aabb;

/// A clickable control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Menu: open the shop
    OpenShop,
    /// Shop: buy or select the catalog entry at this index
    VariantSlot(usize),
    /// Shop: return to the menu
    Back,
}

const SHOP_BUTTON: Aabb = Aabb::new(94.0, 330.0, 100.0, 36.0);
const BACK_BUTTON: Aabb = Aabb::new(94.0, 420.0, 100.0, 36.0);
const SLOT_X: f32 = 44.0;
const SLOT_TOP: f32 = 140.0;
const SLOT_WIDTH: f32 = 200.0;
const SLOT_HEIGHT: f32 = 56.0;
const SLOT_STRIDE: f32 = 70.0;

impl Control {
    /// Where the control sits on the canvas
    pub fn rect(self) -> Aabb {
        match self {
            Control::OpenShop => SHOP_BUTTON,
            Control::Back => BACK_BUTTON,
            Control::VariantSlot(i) => Aabb::new(
                SLOT_X,
                SLOT_TOP + i as f32 * SLOT_STRIDE,
                SLOT_WIDTH,
                SLOT_HEIGHT,
            ),
        }
    }
}

/// Controls visible in a mode
pub fn controls(mode: &Mode) -> Vec<Control> {
    match mode {
        Mode::Menu => vec![Control::OpenShop],
        Mode::Shop => (0..VARIANTS.len())
            .map(Control::VariantSlot)
            .chain(std::iter::once(Control::Back))
            .collect(),
        Mode::Session | Mode::PostDeath { .. } => Vec::new(),
    }
}

/// The control under `point`, if any
pub fn hit_test(mode: &Mode, point: Vec2) -> Option<Control> {
    controls(mode).into_iter().find(|c| c.rect().contains(point))
}
