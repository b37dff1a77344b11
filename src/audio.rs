//! Sound effect requests
//!
//! The simulation only names the sounds it wants; a sink decides what playing
//! them means. The terminal build has no audio device, so its sink logs.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped
    Flap,
    /// Obstacle pair passed
    Point,
    /// Bonus coin collected
    Coin,
    /// Player hit ground or an obstacle
    Hit,
    /// Variant bought in the shop
    Purchase,
    /// Shop choice rejected (not enough coins)
    Denied,
    /// Screen/mode change
    Swoosh,
}

impl SoundEffect {
    /// Asset name of the effect
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Flap => "wing",
            SoundEffect::Point => "point",
            SoundEffect::Coin => "coin",
            SoundEffect::Hit => "hit",
            SoundEffect::Purchase => "purchase",
            SoundEffect::Denied => "denied",
            SoundEffect::Swoosh => "swoosh",
        }
    }
}

/// Plays (or records) requested sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that logs each request at debug level
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            log::debug!("play sound: {}", effect.name());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Collects every request
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAudio {
        pub played: Vec<SoundEffect>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    #[test]
    fn test_effect_names_are_unique() {
        let all = [
            SoundEffect::Flap,
            SoundEffect::Point,
            SoundEffect::Coin,
            SoundEffect::Hit,
            SoundEffect::Purchase,
            SoundEffect::Denied,
            SoundEffect::Swoosh,
        ];
        let mut names: Vec<_> = all.iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut recorder = RecordingAudio::default();
        recorder.play(SoundEffect::Flap);
        recorder.play(SoundEffect::Hit);
        assert_eq!(recorder.played, vec![SoundEffect::Flap, SoundEffect::Hit]);
    }
}
