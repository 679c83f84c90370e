use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainerError {
    Pitch(PitchError),
    UnknownChannel { index: usize, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PitchError {
    Empty,
    UnknownSymbol { text: String },
    InvalidOctave { text: String },
    OctaveOutOfRange { octave: u32 },
}

impl fmt::Display for TrainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainerError::Pitch(e) => write!(f, "Pitch error: {e}"),
            TrainerError::UnknownChannel { index, count } => {
                write!(f, "Unknown channel {index} (trainer has {count})")
            }
        }
    }
}

impl std::error::Error for TrainerError {}

impl fmt::Display for PitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchError::Empty => write!(f, "Empty note name"),
            PitchError::UnknownSymbol { text } => write!(f, "Unknown note symbol '{text}'"),
            PitchError::InvalidOctave { text } => write!(f, "Invalid octave '{text}'"),
            PitchError::OctaveOutOfRange { octave } => {
                write!(f, "Octave {octave} out of range (0-8)")
            }
        }
    }
}

impl std::error::Error for PitchError {}

impl From<PitchError> for TrainerError {
    fn from(e: PitchError) -> Self {
        TrainerError::Pitch(e)
    }
}
