//! Tone commands — the contract between the core and the synthesis engine.
//!
//! The core decides WHEN tones start and stop and with WHICH pitch; the
//! host's Web-Audio engine does the actual sound production. Commands carry
//! a time offset in seconds relative to the engine's transport clock
//! ("now"), which the core treats as an opaque scheduling parameter.

use serde::{Deserialize, Serialize};

use crate::notes::Pitch;

/// One scheduling instruction for the external tone generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToneCommand {
    /// Begin sounding `pitch` at `now + at_time`.
    Start {
        pitch: Pitch,
        #[serde(rename = "atTime")]
        at_time: f64,
    },
    /// Release `pitch` at `now + at_time`.
    Stop {
        pitch: Pitch,
        #[serde(rename = "atTime")]
        at_time: f64,
    },
    /// Move the stereo position; `value` is already scaled to [-1, 1].
    Pan {
        value: f64,
        #[serde(rename = "atTime")]
        at_time: f64,
    },
}

/// The synthesis-engine collaborator a channel talks to. Envelope timing and
/// stereo placement live behind this seam, not in the core.
pub trait ToneGenerator {
    fn start_tone(&mut self, pitch: &Pitch, at_time: f64);
    fn stop_tone(&mut self, pitch: &Pitch, at_time: f64);
    fn set_pan(&mut self, value: f64, at_time: f64);
}

/// A generator that buffers commands for the host to drain. This is the
/// generator used at the WASM boundary, where the JS shell executes the
/// queue against its engine after every call into the core.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: Vec<ToneCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        CommandQueue::default()
    }

    /// Take all queued commands, oldest first.
    pub fn drain(&mut self) -> Vec<ToneCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Peek at the queue without consuming it.
    pub fn commands(&self) -> &[ToneCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl ToneGenerator for CommandQueue {
    fn start_tone(&mut self, pitch: &Pitch, at_time: f64) {
        self.commands.push(ToneCommand::Start {
            pitch: pitch.clone(),
            at_time,
        });
    }

    fn stop_tone(&mut self, pitch: &Pitch, at_time: f64) {
        self.commands.push(ToneCommand::Stop {
            pitch: pitch.clone(),
            at_time,
        });
    }

    fn set_pan(&mut self, value: f64, at_time: f64) {
        self.commands.push(ToneCommand::Pan { value, at_time });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    #[test]
    fn queue_records_in_order() {
        let mut queue = CommandQueue::new();
        queue.stop_tone(&pitch("E4"), 1.0);
        queue.start_tone(&pitch("G4"), 1.0);
        queue.set_pan(0.5, 0.0);

        assert_eq!(queue.len(), 3);
        let commands = queue.drain();
        assert_eq!(
            commands,
            vec![
                ToneCommand::Stop { pitch: pitch("E4"), at_time: 1.0 },
                ToneCommand::Start { pitch: pitch("G4"), at_time: 1.0 },
                ToneCommand::Pan { value: 0.5, at_time: 0.0 },
            ]
        );
        assert!(queue.is_empty(), "drain must leave the queue empty");
    }

    #[test]
    fn start_command_json_shape() {
        let cmd = ToneCommand::Start {
            pitch: pitch("E4"),
            at_time: 0.0,
        };
        assert_eq!(
            serde_json::to_string(&cmd).unwrap(),
            r#"{"type":"start","pitch":"E4","atTime":0.0}"#
        );
    }

    #[test]
    fn pan_command_json_shape() {
        let cmd = ToneCommand::Pan {
            value: -0.3,
            at_time: 0.0,
        };
        assert_eq!(
            serde_json::to_string(&cmd).unwrap(),
            r#"{"type":"pan","value":-0.3,"atTime":0.0}"#
        );
    }

    #[test]
    fn command_roundtrip() {
        let cmd = ToneCommand::Stop {
            pitch: pitch("F#3"),
            at_time: 1.0,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: ToneCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
