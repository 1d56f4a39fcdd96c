//! Audio seam
//!
//! The core never plays audio itself; it forwards a handle through the
//! `GameContext` so traits can request sounds by name. What a name
//! maps to (a synth patch, a sample, nothing) is the driver's problem.

/// Abstract audio sink passed through the game context.
pub trait AudioHandle {
    /// Request a named sound. Fire-and-forget.
    fn play(&mut self, name: &str);
}

/// Audio handle that drops every request. Default for headless runs
/// and for drivers without an audio backend.
pub struct NullAudio;

impl AudioHandle for NullAudio {
    fn play(&mut self, _name: &str) {}
}

/// Records requested sound names, for asserting on audio side effects.
#[cfg(test)]
pub struct RecordingAudio {
    pub played: Vec<String>,
}

#[cfg(test)]
impl RecordingAudio {
    pub fn new() -> Self {
        Self { played: Vec::new() }
    }
}

#[cfg(test)]
impl AudioHandle for RecordingAudio {
    fn play(&mut self, name: &str) {
        self.played.push(name.to_string());
    }
}
