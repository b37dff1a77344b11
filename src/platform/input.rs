//! Terminal input polling
//!
//! Drains pending crossterm events once per tick into a [`TickInput`].
//! Mouse positions are converted to canvas space through the [`Viewport`].
//! A few keys stand in for clicks on the on-screen controls.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;

use super::viewport::Viewport;
use crate::Result;
use crate::progression::VARIANTS;
use crate::sim::TickInput;
use crate::ui::Control;

/// Source of per-tick input
pub trait InputSource {
    /// Collect everything that happened since the last poll
    fn poll(&mut self) -> Result<TickInput>;

    /// Drop anything queued (used after a blocking hold)
    fn discard_pending(&mut self) -> Result<()>;
}

/// Keyboard and mouse input from the terminal
#[derive(Debug)]
pub struct TerminalInput {
    viewport: Viewport,
    /// Last known pointer position, kept between ticks for hover
    pointer: Option<Vec2>,
}

impl TerminalInput {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: None,
        }
    }

    /// Fold one terminal event into this tick's input
    pub fn apply(&mut self, event: Event, input: &mut TickInput) {
        match event {
            Event::Key(key) => self.apply_key(key, input),
            Event::Mouse(mouse) => self.apply_mouse(mouse, input),
            Event::Resize(cols, rows) => {
                self.viewport = Viewport::from_terminal(cols, rows);
                log::debug!("terminal resized to {}x{}", cols, rows);
            }
            _ => {}
        }
        input.pointer = self.pointer;
    }

    fn apply_key(&mut self, key: KeyEvent, input: &mut TickInput) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let shortcut = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.quit = true;
                None
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                input.quit = true;
                None
            }
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                input.jump = true;
                None
            }
            KeyCode::Char('s') => Some(Control::OpenShop),
            KeyCode::Char('b') | KeyCode::Backspace => Some(Control::Back),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                (index < VARIANTS.len()).then_some(Control::VariantSlot(index))
            }
            _ => None,
        };
        if let Some(control) = shortcut {
            input.click = Some(control.rect().center());
        }
    }

    fn apply_mouse(&mut self, mouse: MouseEvent, input: &mut TickInput) {
        let pos = self.viewport.cell_to_canvas(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer = Some(pos);
                input.click = Some(pos);
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some(pos);
            }
            _ => {}
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<TickInput> {
        let mut input = TickInput {
            pointer: self.pointer,
            ..Default::default()
        };
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.apply(ev, &mut input);
        }
        Ok(input)
    }

    fn discard_pending(&mut self) -> Result<()> {
        let mut discarded = 0;
        while event::poll(Duration::ZERO)? {
            if let Event::Resize(cols, rows) = event::read()? {
                self.viewport = Viewport::from_terminal(cols, rows);
            }
            discarded += 1;
        }
        if discarded > 0 {
            log::debug!("discarded {} events during hold", discarded);
        }
        Ok(())
    }
}
