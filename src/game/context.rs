//! Per-step game context
//!
//! A `GameContext` is built by the driver every frame and passed by
//! mutable reference into every update call. It bundles the fixed
//! delta-time for the step, the audio handle, and the event queues.
//! The borrows make it impossible for a trait or layer to retain it
//! past the step.

use crate::audio::AudioHandle;
use super::event::Events;

/// Transient bundle of shared values for one simulation step.
pub struct GameContext<'a> {
    /// Elapsed simulation time for this step, in seconds.
    pub delta_time: f32,
    /// Audio sink. The core never calls this itself, only forwards it
    /// to traits that want to play sounds.
    pub audio: &'a mut dyn AudioHandle,
    /// Per-step event queues for deferred cross-entity effects.
    pub events: &'a mut Events,
}

impl<'a> GameContext<'a> {
    pub fn new(delta_time: f32, audio: &'a mut dyn AudioHandle, events: &'a mut Events) -> Self {
        Self {
            delta_time,
            audio,
            events,
        }
    }
}
