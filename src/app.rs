//! Application loop
//!
//! Drives the simulation at a fixed rate over the platform collaborators:
//! poll input, tick, play sounds, honor holds, present, pace. The profile is
//! written once when the loop ends.

use crate::Result;
use crate::audio::AudioSink;
use crate::persistence::ProfileStore;
use crate::platform::{Clock, InputSource};
use crate::renderer::Presenter;
use crate::sim::{GameState, tick};

/// Run until the input source reports quit
///
/// The profile is saved even when the loop stops on an error; the loop's
/// error wins over a failed save.
pub fn run(
    state: &mut GameState,
    store: &dyn ProfileStore,
    input: &mut dyn InputSource,
    presenter: &mut dyn Presenter,
    audio: &mut dyn AudioSink,
    clock: &mut dyn Clock,
) -> Result<()> {
    let outcome = drive(state, input, presenter, audio, clock);
    if let Err(e) = &outcome {
        log::error!("game loop stopped: {}", e);
    }
    let saved = state.progression.save(store);
    outcome.and(saved)
}

fn drive(
    state: &mut GameState,
    input: &mut dyn InputSource,
    presenter: &mut dyn Presenter,
    audio: &mut dyn AudioSink,
    clock: &mut dyn Clock,
) -> Result<()> {
    presenter.present(state)?;
    let mut ticks: u64 = 0;

    loop {
        let frame_input = input.poll()?;
        if frame_input.quit {
            log::info!("quit requested after {} ticks", ticks);
            return Ok(());
        }

        let report = tick(state, &frame_input);
        ticks += 1;

        for sound in &report.sounds {
            audio.play(*sound);
        }
        if let Some((from, to)) = report.transition {
            log::debug!("tick {}: {} -> {}", ticks, from, to);
        }
        if let Some(pause) = report.hold {
            clock.hold(pause);
            input.discard_pending()?;
        }

        presenter.present(state)?;
        clock.wait_for_next_tick();
    }
}
