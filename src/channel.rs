//! Channel — one independent voice of the trainer.
//!
//! A channel tracks its selected pitch, stereo pan, mute state, and the
//! shared play flag, and derives the start/stop commands to issue to its
//! tone generator whenever an input changes. Each input event triggers one
//! reaction over an ordered rule list, so the priority between a pitch
//! change and a play/mute change is explicit rather than an accident of
//! evaluation order.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::command::ToneGenerator;
use crate::notes::Pitch;

/// Offset in seconds applied to release commands, and to both halves of a
/// retrigger. Starts triggered by the play flag go out at offset 0.0.
pub const RELEASE_DELAY: f64 = 1.0;

/// Host-supplied channel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Pitch selected when the channel is created.
    #[serde(rename = "defaultNote")]
    pub default_note: Pitch,
    /// Stereo position in [-100, 100]. 0 is center.
    #[serde(default)]
    pub pan: i32,
    /// Whether the channel starts audible.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ChannelConfig {
    pub fn new(default_note: Pitch) -> Self {
        ChannelConfig {
            default_note,
            pan: 0,
            active: true,
        }
    }
}

/// Mutable per-channel record. Fields change only in response to input
/// events; `sounding` mirrors whether the generator currently holds a tone.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelState {
    pub current_pitch: Pitch,
    /// The pitch before the most recent change. `None` until the first
    /// reaction runs; synced to `current_pitch` after every reaction.
    pub previous_pitch: Option<Pitch>,
    /// Audible (unmuted)?
    pub active: bool,
    /// Is a tone currently being emitted?
    pub sounding: bool,
    /// Raw slider value in [-100, 100], forwarded as `pan / 100`.
    pub pan: i32,
    /// Last delivered value of the shared play flag.
    pub global_playing: bool,
}

/// One audio channel: selected pitch, pan, mute, and the state machine that
/// drives its tone generator.
pub struct Channel<S: ToneGenerator> {
    state: ChannelState,
    generator: S,
}

impl<S: ToneGenerator> Channel<S> {
    pub fn new(config: ChannelConfig, generator: S) -> Self {
        Channel {
            state: ChannelState {
                current_pitch: config.default_note,
                previous_pitch: None,
                active: config.active,
                sounding: false,
                pan: config.pan,
                global_playing: false,
            },
            generator,
        }
    }

    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    pub fn generator(&self) -> &S {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut S {
        &mut self.generator
    }

    /// Select a new pitch. While sounding this retriggers: the old pitch is
    /// released and the new one started at the same deadline, a glide
    /// rather than a gap.
    pub fn set_pitch(&mut self, pitch: Pitch) {
        debug!("new note {pitch}");
        let old = std::mem::replace(&mut self.state.current_pitch, pitch);
        self.state.previous_pitch = Some(old);
        self.react();
    }

    /// Move the stereo position. Forwarded straight to the generator;
    /// never a start/stop transition. Out-of-range values pass through
    /// unclamped; the host slider bounds its own input.
    pub fn set_pan(&mut self, value: i32) {
        self.state.pan = value;
        debug!("new panning {}", value as f64 / 100.0);
        self.generator.set_pan(value as f64 / 100.0, 0.0);
    }

    /// Mute or unmute this channel.
    pub fn set_active(&mut self, active: bool) {
        self.state.active = active;
        self.react();
    }

    /// Deliver the shared play flag. The flag is broadcast to each channel
    /// as an explicit event; channels never share mutable state.
    pub fn set_global_playing(&mut self, playing: bool) {
        self.state.global_playing = playing;
        self.react();
    }

    /// Teardown: release whatever is still sounding.
    pub fn release(&mut self) {
        if self.state.sounding {
            self.generator
                .stop_tone(&self.state.current_pitch, RELEASE_DELAY);
            self.state.sounding = false;
        }
    }

    // The ordered rule list, run once per input event. Order is
    // load-bearing: a pitch change while sounding always takes the
    // retrigger path, even when the same update would otherwise stop the
    // channel.
    fn react(&mut self) {
        let state = &mut self.state;
        let pitch_changed = state
            .previous_pitch
            .as_ref()
            .is_some_and(|prev| *prev != state.current_pitch);

        if state.sounding && pitch_changed {
            // Retrigger. The stop is issued for the OLD pitch only, at the
            // same deadline as the new attack. `sounding` stays true.
            if let Some(prev) = state.previous_pitch.take() {
                debug!("stop for note change {prev}");
                self.generator.stop_tone(&prev, RELEASE_DELAY);
            }
            debug!("changing to note {}", state.current_pitch);
            self.generator.start_tone(&state.current_pitch, RELEASE_DELAY);
        } else if state.global_playing && state.active && !state.sounding {
            debug!("play {}", state.current_pitch);
            self.generator.start_tone(&state.current_pitch, 0.0);
            state.sounding = true;
        } else if (!state.global_playing || !state.active) && state.sounding {
            debug!("stop {}", state.current_pitch);
            self.generator
                .stop_tone(&state.current_pitch, RELEASE_DELAY);
            state.sounding = false;
        }
        // Rule 4: no emission. Repeated identical inputs stay silent.

        state.previous_pitch = Some(state.current_pitch.clone());
    }
}
