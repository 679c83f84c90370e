//! Trainer — the multi-channel session behind the app shell.
//!
//! Owns one channel per configured voice plus the process-wide play flag.
//! The flag is delivered to each channel as an explicit event, so every
//! channel stays independently testable; the trainer only fans inputs out
//! and gathers the resulting tone commands in channel order.

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelConfig, ChannelState};
use crate::command::{CommandQueue, ToneCommand};
use crate::error::TrainerError;
use crate::notes::Pitch;

/// Session settings: one entry per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub channels: Vec<ChannelConfig>,
}

impl Default for TrainerConfig {
    /// The classic two-channel interval setup: E4 and G4, centered, audible.
    fn default() -> Self {
        TrainerConfig {
            channels: vec![
                ChannelConfig::new(Pitch::from_parts("E", 4)),
                ChannelConfig::new(Pitch::from_parts("G", 4)),
            ],
        }
    }
}

/// A tone command stamped with the channel that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelCommand {
    pub channel: usize,
    #[serde(flatten)]
    pub command: ToneCommand,
}

/// The ear-training session: independent channels plus the shared play flag.
pub struct Trainer {
    channels: Vec<Channel<CommandQueue>>,
    playing: bool,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        let channels = config
            .channels
            .into_iter()
            .map(|c| Channel::new(c, CommandQueue::new()))
            .collect();
        Trainer {
            channels,
            playing: false,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn channel_state(&self, index: usize) -> Result<&ChannelState, TrainerError> {
        let count = self.channels.len();
        self.channels
            .get(index)
            .map(Channel::state)
            .ok_or(TrainerError::UnknownChannel { index, count })
    }

    /// Broadcast the shared play flag to every channel.
    pub fn set_playing(&mut self, playing: bool) -> Vec<ChannelCommand> {
        self.playing = playing;
        for channel in &mut self.channels {
            channel.set_global_playing(playing);
        }
        self.collect()
    }

    /// Flip the play flag (the Play/Stop button).
    pub fn toggle_playing(&mut self) -> Vec<ChannelCommand> {
        self.set_playing(!self.playing)
    }

    /// Select a note on one channel. The name is validated before anything
    /// is mutated.
    pub fn set_note(&mut self, index: usize, note: &str) -> Result<Vec<ChannelCommand>, TrainerError> {
        let pitch: Pitch = note.parse()?;
        self.channel_mut(index)?.set_pitch(pitch);
        Ok(self.collect())
    }

    /// Move one channel's pan slider.
    pub fn set_pan(&mut self, index: usize, value: i32) -> Result<Vec<ChannelCommand>, TrainerError> {
        self.channel_mut(index)?.set_pan(value);
        Ok(self.collect())
    }

    /// Mute or unmute one channel.
    pub fn set_active(&mut self, index: usize, active: bool) -> Result<Vec<ChannelCommand>, TrainerError> {
        self.channel_mut(index)?.set_active(active);
        Ok(self.collect())
    }

    /// Teardown: release every channel that is still sounding.
    pub fn release_all(&mut self) -> Vec<ChannelCommand> {
        for channel in &mut self.channels {
            channel.release();
        }
        self.collect()
    }

    fn channel_mut(&mut self, index: usize) -> Result<&mut Channel<CommandQueue>, TrainerError> {
        let count = self.channels.len();
        self.channels
            .get_mut(index)
            .ok_or(TrainerError::UnknownChannel { index, count })
    }

    // Gather queued commands from every channel, in channel order.
    fn collect(&mut self) -> Vec<ChannelCommand> {
        let mut out = Vec::new();
        for (i, channel) in self.channels.iter_mut().enumerate() {
            for command in channel.generator_mut().drain() {
                out.push(ChannelCommand {
                    channel: i,
                    command,
                });
            }
        }
        out
    }
}
