//! Terminal presenter
//!
//! Composes a frame into the pixel buffer, prints text labels over it and
//! flushes once per tick. Owns the terminal while active (raw mode, alternate
//! screen, mouse capture) and restores it on drop.

use std::io::Write;

use crossterm::{
    cursor, event, execute, queue,
    style::{self, Color},
    terminal,
};
use glam::Vec2;

use super::Presenter;
use super::canvas::{PixelBuf, Rgb};
use super::sprites::{self, Sprites};
use crate::Result;
use crate::consts::*;
use crate::platform::Viewport;
use crate::progression::VARIANTS;
use crate::sim::{Aabb, GameState, Mode};
use crate::ui::{self, Control};

const PANEL: Rgb = Rgb(222, 216, 149);
const PANEL_HOVER: Rgb = Rgb(245, 240, 190);
const PANEL_TEXT: Rgb = Rgb(84, 56, 71);
const OWNED: Rgb = Rgb(60, 140, 60);

/// A line of text anchored at its center, canvas space
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub center: Vec2,
    pub text: String,
    pub fg: Rgb,
    pub bg: Option<Rgb>,
}

impl Label {
    fn new(x: f32, y: f32, text: impl Into<String>, fg: Rgb) -> Self {
        Self {
            center: Vec2::new(x, y),
            text: text.into(),
            fg,
            bg: None,
        }
    }

    fn on(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }
}

/// Draw the scene for `state` into `buf`, returning the text to overlay
pub fn compose(buf: &mut PixelBuf, vp: &Viewport, state: &GameState, sprites: &Sprites) -> Vec<Label> {
    buf.clear(Rgb(0, 0, 0));
    let world = &state.world;

    sprites::draw_sky(buf, vp, world.time_of_day);
    for tile in &world.backdrop.tiles {
        sprites::draw_entity(buf, vp, tile);
    }
    for pair in world.registry.pairs() {
        for member in pair.members() {
            sprites::draw_entity(buf, vp, member);
        }
    }
    for bonus in world.registry.bonuses() {
        sprites::draw_entity(buf, vp, &bonus.entity);
    }
    for tile in &world.ground.tiles {
        sprites::draw_entity(buf, vp, tile);
    }
    sprites::draw_player(buf, vp, &world.player, sprites);

    let mid = CANVAS_WIDTH / 2.0;
    let profile = state.progression.profile();
    let mut labels = Vec::new();

    match state.mode {
        Mode::Session => {
            sprites::draw_number(buf, vp, mid, 30.0, state.progression.session_score(), 8.0);
        }
        Mode::Menu => {
            labels.push(Label::new(mid, 90.0, "S K Y L I G H T", sprites::WHITE));
            labels.push(Label::new(mid, 130.0, "SPACE to fly", sprites::WHITE));
            labels.push(Label::new(
                mid,
                GROUND_Y + 40.0,
                format!("Best {}   Coins {}", profile.high_score, profile.currency),
                sprites::WHITE,
            ));
            labels.push(draw_button(buf, vp, state, Control::OpenShop, "SHOP [s]"));
        }
        Mode::PostDeath { summary } => {
            buf.fill_canvas(vp, Aabb::new(44.0, 150.0, 200.0, 140.0), PANEL);
            labels.push(Label::new(mid, 175.0, "GAME OVER", PANEL_TEXT).on(PANEL));
            labels.push(Label::new(mid, 215.0, format!("Score {}", summary.score), PANEL_TEXT).on(PANEL));
            labels.push(
                Label::new(mid, 245.0, format!("Best {}", profile.high_score), PANEL_TEXT).on(PANEL),
            );
            if summary.new_high_score {
                labels.push(Label::new(mid, 275.0, "NEW BEST!", Rgb(200, 60, 40)).on(PANEL));
            }
        }
        Mode::Shop => {
            labels.push(Label::new(mid, 90.0, format!("Coins {}", profile.currency), sprites::WHITE));
            for control in ui::controls(&state.mode) {
                let text = match control {
                    Control::VariantSlot(i) => {
                        let variant = VARIANTS[i];
                        let status = if profile.selected_variant == variant.id {
                            "SELECTED".to_string()
                        } else if profile.owns(i) {
                            "OWNED".to_string()
                        } else {
                            format!("{} coins", state.tuning.variant_price)
                        };
                        let rect = control.rect();
                        let swatch = Aabb::new(rect.left() + 8.0, rect.top() + 16.0, 24.0, 24.0);
                        let mut label = draw_button(buf, vp, state, control, "");
                        buf.fill_canvas(vp, swatch, sprites::variant_color(variant.id));
                        label.text = format!("{} {}  {}", i + 1, variant.label, status);
                        if profile.owns(i) {
                            label.fg = OWNED;
                        }
                        labels.push(label);
                        continue;
                    }
                    Control::Back => "BACK [b]",
                    Control::OpenShop => continue,
                };
                labels.push(draw_button(buf, vp, state, control, text));
            }
        }
    }
    labels
}

/// Button background (highlighted on hover) plus its label
fn draw_button(buf: &mut PixelBuf, vp: &Viewport, state: &GameState, control: Control, text: &str) -> Label {
    let rect = control.rect();
    let bg = if state.hovered == Some(control) { PANEL_HOVER } else { PANEL };
    buf.fill_canvas(vp, rect, bg);
    let c = rect.center();
    Label::new(c.x, c.y, text, PANEL_TEXT).on(bg)
}

/// Presents frames on a crossterm terminal
pub struct TerminalPresenter<W: Write> {
    out: W,
    buf: PixelBuf,
    viewport: Viewport,
    sprites: Sprites,
    active: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Result<Self> {
        let viewport = Viewport::from_terminal(cols, rows);
        Ok(Self {
            out,
            buf: PixelBuf::new(viewport.pixel_w, viewport.pixel_h),
            viewport,
            sprites: Sprites::load()?,
            active: false,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Take over the terminal
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            event::EnableMouseCapture,
        )?;
        self.active = true;
        Ok(())
    }

    /// Give the terminal back
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn resize_if_needed(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let vp = Viewport::from_terminal(cols, rows);
        if vp != self.viewport {
            self.viewport = vp;
            self.buf.resize(vp.pixel_w, vp.pixel_h);
        }
        Ok(())
    }

    fn print_labels(&mut self, labels: &[Label]) -> Result<()> {
        for label in labels {
            let (col, row) = self.viewport.canvas_to_cell(label.center);
            let half = (label.text.chars().count() / 2) as u16;
            queue!(
                self.out,
                cursor::MoveTo(col.saturating_sub(half), row),
                style::SetForegroundColor(label.fg.to_color()),
                style::SetBackgroundColor(label.bg.map(Rgb::to_color).unwrap_or(Color::Reset)),
                style::Print(&label.text),
                style::ResetColor,
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, state: &GameState) -> Result<()> {
        if self.active {
            self.resize_if_needed()?;
        }
        let labels = compose(&mut self.buf, &self.viewport, state, &self.sprites);
        self.buf.render(&mut self.out)?;
        self.print_labels(&labels)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalPresenter<W> {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            log::error!("failed to restore terminal: {}", e);
        }
    }
}
