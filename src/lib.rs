pub mod channel;
pub mod command;
pub mod error;
pub mod notes;
pub mod trainer;

use wasm_bindgen::prelude::*;

use crate::trainer::{Trainer, TrainerConfig};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the eartrainer-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: the 112-slot note catalog for the note selectors.
/// Gap slots serialize as empty values; the host selector skips them.
#[wasm_bindgen]
pub fn note_table() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&notes::generate_note_table())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: frequency in Hz of a note name at standard A4 = 440 tuning.
#[wasm_bindgen]
pub fn note_frequency(note: &str) -> Result<f64, JsValue> {
    notes::note_to_frequency(note)
        .ok_or_else(|| JsValue::from_str(&format!("unknown note: {note}")))
}

/// WASM-exposed session handle. Every mutator returns the tone commands the
/// host must apply to its synthesis engine, as a JS array of
/// `{channel, type, pitch?, value?, atTime}` objects.
#[wasm_bindgen]
pub struct EarTrainer {
    trainer: Trainer,
}

#[wasm_bindgen]
impl EarTrainer {
    /// Build a trainer from a `TrainerConfig` JS object, or the default
    /// two-channel setup when `config` is null/undefined.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<EarTrainer, JsValue> {
        let config: TrainerConfig = if config.is_null() || config.is_undefined() {
            TrainerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("{e}")))?
        };
        Ok(EarTrainer {
            trainer: Trainer::new(config),
        })
    }

    /// Build a trainer from a JSON config string, for hosts that persist
    /// settings as text.
    pub fn from_json(config: &str) -> Result<EarTrainer, JsValue> {
        let config: TrainerConfig =
            serde_json::from_str(config).map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(EarTrainer {
            trainer: Trainer::new(config),
        })
    }

    pub fn is_playing(&self) -> bool {
        self.trainer.is_playing()
    }

    pub fn channel_count(&self) -> usize {
        self.trainer.channel_count()
    }

    /// Broadcast the shared play flag to every channel.
    pub fn set_playing(&mut self, playing: bool) -> Result<JsValue, JsValue> {
        to_js(&self.trainer.set_playing(playing))
    }

    /// Flip the play flag (the Play/Stop button).
    pub fn toggle_playing(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.trainer.toggle_playing())
    }

    /// Select a note on one channel.
    pub fn set_note(&mut self, channel: usize, note: &str) -> Result<JsValue, JsValue> {
        let commands = self
            .trainer
            .set_note(channel, note)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        to_js(&commands)
    }

    /// Move one channel's pan slider ([-100, 100]).
    pub fn set_pan(&mut self, channel: usize, value: i32) -> Result<JsValue, JsValue> {
        let commands = self
            .trainer
            .set_pan(channel, value)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        to_js(&commands)
    }

    /// Mute or unmute one channel.
    pub fn set_active(&mut self, channel: usize, active: bool) -> Result<JsValue, JsValue> {
        let commands = self
            .trainer
            .set_active(channel, active)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        to_js(&commands)
    }

    /// Teardown on unmount: release everything still sounding.
    pub fn release(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.trainer.release_all())
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("{e}")))
}
