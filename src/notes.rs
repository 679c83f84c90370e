//! Note catalog and pitch helpers.
//!
//! The catalog feeds the note selectors in the app shell: a fixed 112-slot
//! table covering octaves 0 through 8. Helpers convert note names to MIDI
//! numbers and frequencies for display and tooling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PitchError;

/// The 12-symbol chromatic alphabet, in order within an octave.
pub const CHROMATIC: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Number of slots in the note catalog.
pub const NOTE_TABLE_LEN: usize = 112;

/// A note name plus octave in canonical form, e.g. `E4` or `F#3`.
///
/// Equality is string equality. Parsing accepts exactly the canonical form:
/// a symbol from the chromatic alphabet (sharps only, no flats) followed by
/// an octave digit 0-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch(String);

impl Pitch {
    // Infallible constructor for pitches assembled from the chromatic
    // alphabet. String input goes through `FromStr` instead.
    pub(crate) fn from_parts(symbol: &str, octave: usize) -> Pitch {
        Pitch(format!("{symbol}{octave}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIDI note number of this pitch (C4 = 60).
    pub fn midi(&self) -> Option<i32> {
        note_to_midi(&self.0)
    }

    /// Frequency in Hz at standard A4 = 440 tuning.
    pub fn frequency(&self) -> Option<f64> {
        note_to_frequency(&self.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PitchError::Empty);
        }

        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(s.len());
        let (symbol, octave_str) = s.split_at(digits_at);

        if !CHROMATIC.contains(&symbol) {
            return Err(PitchError::UnknownSymbol {
                text: symbol.to_string(),
            });
        }

        let octave: u32 = octave_str.parse().map_err(|_| PitchError::InvalidOctave {
            text: octave_str.to_string(),
        })?;
        if octave > 8 {
            return Err(PitchError::OctaveOutOfRange { octave });
        }

        Ok(Pitch(s.to_string()))
    }
}

impl TryFrom<String> for Pitch {
    type Error = PitchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pitch> for String {
    fn from(p: Pitch) -> String {
        p.0
    }
}

/// Generate the note catalog backing the note selectors.
///
/// Slots are laid out by `octave * 13 + chromatic_index`; generation stops
/// the moment the linear position reaches 112, mid-octave. The stride is 13,
/// not 12: one slot per octave is never written and stays `None`. The
/// published catalog contents depend on that gap pattern.
pub fn generate_note_table() -> Vec<Option<Pitch>> {
    let mut table = vec![None; NOTE_TABLE_LEN];

    for octave in 0..=8 {
        for (i, symbol) in CHROMATIC.iter().enumerate() {
            let pos = octave * (CHROMATIC.len() + 1) + i;
            // Checked before every assignment, not only at row starts.
            if pos == NOTE_TABLE_LEN {
                return table;
            }
            table[pos] = Some(Pitch::from_parts(symbol, octave));
        }
    }

    table
}

/// Parse a note name (e.g. "C4", "F#3", "Bb5") into a MIDI note number.
///
/// More permissive than `Pitch` parsing: flats and out-of-catalog octaves
/// are accepted here.
pub fn note_to_midi(note: &str) -> Option<i32> {
    let mut chars = note.chars();
    let mut semitone = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let octave_str = match rest.as_bytes().first() {
        Some(b'#') => {
            semitone += 1;
            &rest[1..]
        }
        Some(b'b') => {
            semitone -= 1;
            &rest[1..]
        }
        _ => rest,
    };

    let octave: i32 = octave_str.parse().ok()?;

    // MIDI note number: C4 = 60
    Some((octave + 1) * 12 + semitone)
}

/// Convert a MIDI note number to frequency using the given tuning pitch.
///
/// `tuning_pitch` is the frequency of A4 (MIDI 69). Default is 440.0 Hz.
pub fn midi_to_frequency(midi: i32, tuning_pitch: f64) -> f64 {
    tuning_pitch * (2.0_f64).powf((midi as f64 - 69.0) / 12.0)
}

/// Note-to-frequency conversion at standard A4 = 440 Hz tuning.
pub fn note_to_frequency(note: &str) -> Option<f64> {
    note_to_frequency_with_tuning(note, 440.0)
}

/// Note-to-frequency conversion with configurable tuning pitch.
///
/// `tuning_pitch` is the frequency of A4. Common values: 440.0, 432.0.
pub fn note_to_frequency_with_tuning(note: &str, tuning_pitch: f64) -> Option<f64> {
    let midi = note_to_midi(note)?;
    Some(midi_to_frequency(midi, tuning_pitch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_exactly_112_slots() {
        assert_eq!(generate_note_table().len(), NOTE_TABLE_LEN);
    }

    #[test]
    fn table_is_deterministic() {
        assert_eq!(generate_note_table(), generate_note_table());
    }

    #[test]
    fn table_follows_the_13_wide_stride() {
        let table = generate_note_table();
        for octave in 0..=8 {
            for (i, symbol) in CHROMATIC.iter().enumerate() {
                let pos = octave * 13 + i;
                if pos >= NOTE_TABLE_LEN {
                    continue;
                }
                let expected = format!("{symbol}{octave}");
                assert_eq!(
                    table[pos].as_ref().map(Pitch::as_str),
                    Some(expected.as_str()),
                    "slot {pos} should hold {expected}"
                );
            }
        }
    }

    #[test]
    fn gap_slots_are_empty() {
        let table = generate_note_table();
        for octave in 0..8 {
            let pos = octave * 13 + 12;
            assert!(table[pos].is_none(), "slot {pos} should be a gap");
        }
    }

    #[test]
    fn table_starts_at_c0_and_ends_at_g8() {
        let table = generate_note_table();
        assert_eq!(table[0].as_ref().map(Pitch::as_str), Some("C0"));
        assert_eq!(table[111].as_ref().map(Pitch::as_str), Some("G8"));
    }

    #[test]
    fn table_entries_are_unique() {
        let table = generate_note_table();
        let entries: Vec<&Pitch> = table.iter().flatten().collect();
        let unique: HashSet<&Pitch> = entries.iter().copied().collect();
        assert_eq!(entries.len(), 104, "8 gap slots out of 112");
        assert_eq!(unique.len(), entries.len(), "catalog entries must not repeat");
    }

    #[test]
    fn pitch_parses_canonical_names() {
        for name in ["C0", "E4", "F#3", "A#7", "B8"] {
            let pitch: Pitch = name.parse().expect(name);
            assert_eq!(pitch.as_str(), name);
        }
    }

    #[test]
    fn pitch_rejects_non_canonical_names() {
        assert_eq!("".parse::<Pitch>(), Err(PitchError::Empty));
        assert_eq!(
            "H4".parse::<Pitch>(),
            Err(PitchError::UnknownSymbol { text: "H".to_string() })
        );
        assert_eq!(
            "Bb4".parse::<Pitch>(),
            Err(PitchError::UnknownSymbol { text: "Bb".to_string() })
        );
        assert_eq!(
            "e4".parse::<Pitch>(),
            Err(PitchError::UnknownSymbol { text: "e".to_string() })
        );
        assert_eq!(
            "C".parse::<Pitch>(),
            Err(PitchError::InvalidOctave { text: "".to_string() })
        );
        assert_eq!(
            "C4x".parse::<Pitch>(),
            Err(PitchError::InvalidOctave { text: "4x".to_string() })
        );
        assert_eq!(
            "C9".parse::<Pitch>(),
            Err(PitchError::OctaveOutOfRange { octave: 9 })
        );
    }

    #[test]
    fn pitch_serializes_as_a_bare_string() {
        let pitch: Pitch = "E4".parse().unwrap();
        assert_eq!(serde_json::to_string(&pitch).unwrap(), "\"E4\"");

        let back: Pitch = serde_json::from_str("\"G4\"").unwrap();
        assert_eq!(back.as_str(), "G4");

        // Deserialization validates, same as parsing.
        assert!(serde_json::from_str::<Pitch>("\"Q4\"").is_err());
    }

    #[test]
    fn note_to_midi_handles_sharps_and_flats() {
        assert_eq!(note_to_midi("C4"), Some(60));
        assert_eq!(note_to_midi("A4"), Some(69));
        assert_eq!(note_to_midi("F#3"), Some(54));
        assert_eq!(note_to_midi("Bb5"), Some(82));
        assert_eq!(note_to_midi("C-1"), Some(0));
        assert_eq!(note_to_midi("H2"), None);
        assert_eq!(note_to_midi(""), None);
    }

    #[test]
    fn a4_is_440() {
        let freq = note_to_frequency("A4").unwrap();
        assert!((freq - 440.0).abs() < 1e-9, "A4 should be 440 Hz, got {freq}");
    }

    #[test]
    fn c4_is_middle_c() {
        let freq = note_to_frequency("C4").unwrap();
        assert!(
            (freq - 261.6255653).abs() < 0.0001,
            "C4 should be ~261.63 Hz, got {freq}"
        );
    }

    #[test]
    fn tuning_pitch_shifts_the_whole_scale() {
        let freq = note_to_frequency_with_tuning("A4", 432.0).unwrap();
        assert!((freq - 432.0).abs() < 1e-9, "A4 at 432 tuning, got {freq}");
    }

    #[test]
    fn pitch_frequency_matches_helper() {
        let pitch: Pitch = "E4".parse().unwrap();
        assert_eq!(pitch.midi(), Some(64));
        assert_eq!(pitch.frequency(), note_to_frequency("E4"));
    }
}
