//! # Notation Types
//!
//! Structured values decoded from RTTTL text.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── name: String
//!   ├── Defaults (default duration, default octave, bpm, whole-note length)
//!   └── Vec<NoteToken>
//!         ├── duration_ms: u32 (dotting already applied)
//!         ├── pitch: PitchClass (Rest | C D E F G A B)
//!         ├── sharp: bool
//!         ├── octave: u8
//!         └── dotted: bool
//! ```
//!
//! ## Chromatic Positions
//! Pitches are located inside an octave by a 1-based chromatic position:
//! `C=1 C#=2 D=3 D#=4 E=5 F=6 F#=7 G=8 G#=9 A=10 A#=11 B=12`. A rest is position 0.
//! `E#` and `B#` are simply position + 1, so `B#` is 13 and resolves to the C of the next
//! octave in the frequency table. The sharp applies to a rest as well, which turns `p#` into
//! a C.

use serde::Serialize;

use crate::error::RtttlError;
use crate::playback::note_frequency;

/// Denominator used when neither the header nor the note gives one (quarter note).
pub const DEFAULT_DURATION: u32 = 4;
/// Octave used when neither the header nor the note gives one.
pub const DEFAULT_OCTAVE: u8 = 6;
/// Tempo used when the header has no `b=` field.
pub const DEFAULT_BPM: u32 = 63;
/// Range accepted for the header's `o=` field.
pub const HEADER_OCTAVE_RANGE: std::ops::RangeInclusive<u8> = 3..=7;

/// Playback defaults decoded from a song header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Defaults {
    pub default_duration: u32,
    pub default_octave: u8,
    pub beats_per_minute: u32,
    /// Length of a whole note in milliseconds, derived from `beats_per_minute`.
    pub whole_note_ms: u32,
}

impl Defaults {
    /// Build defaults from header values, deriving the whole-note length.
    ///
    /// # Errors
    /// [`RtttlError::InvalidBpm`] when `beats_per_minute` is zero.
    pub fn new(
        default_duration: u32,
        default_octave: u8,
        beats_per_minute: u32,
    ) -> Result<Self, RtttlError> {
        Ok(Self {
            default_duration,
            default_octave,
            beats_per_minute,
            whole_note_ms: whole_note_ms(beats_per_minute)?,
        })
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            default_octave: DEFAULT_OCTAVE,
            beats_per_minute: DEFAULT_BPM,
            whole_note_ms: (60_000 / DEFAULT_BPM) * 2,
        }
    }
}

/// Whole-note length for a tempo: `(60000 / bpm) * 2`.
///
/// ```
/// assert_eq!(rtttl::whole_note_ms(100).unwrap(), 1200);
/// assert_eq!(rtttl::whole_note_ms(63).unwrap(), 1904);
/// assert!(rtttl::whole_note_ms(0).is_err());
/// ```
pub fn whole_note_ms(beats_per_minute: u32) -> Result<u32, RtttlError> {
    if beats_per_minute == 0 {
        return Err(RtttlError::InvalidBpm);
    }
    Ok((60_000 / beats_per_minute) * 2)
}

/// Pitch class of a note token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchClass {
    Rest,
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchClass {
    /// Map a note letter. `p` and any unrecognized character are rests.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'c' => PitchClass::C,
            'd' => PitchClass::D,
            'e' => PitchClass::E,
            'f' => PitchClass::F,
            'g' => PitchClass::G,
            'a' => PitchClass::A,
            'b' => PitchClass::B,
            _ => PitchClass::Rest,
        }
    }

    /// Position of the natural pitch within the octave (0 for a rest).
    pub fn chromatic_position(self) -> u8 {
        match self {
            PitchClass::Rest => 0,
            PitchClass::C => 1,
            PitchClass::D => 3,
            PitchClass::E => 5,
            PitchClass::F => 6,
            PitchClass::G => 8,
            PitchClass::A => 10,
            PitchClass::B => 12,
        }
    }
}

/// One decoded note or rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteToken {
    pub duration_ms: u32,
    pub pitch: PitchClass,
    pub sharp: bool,
    pub octave: u8,
    pub dotted: bool,
}

impl NoteToken {
    /// True for position 0. A sharped rest (`p#`) lands on position 1 and sounds a C.
    pub fn is_rest(&self) -> bool {
        self.chromatic_position() == 0
    }

    /// Chromatic position including the sharp.
    pub fn chromatic_position(&self) -> u8 {
        self.pitch.chromatic_position() + u8::from(self.sharp)
    }

    /// Frequency in Hz, or `None` for a rest.
    ///
    /// ```
    /// use rtttl::{NoteToken, PitchClass};
    ///
    /// let a4 = NoteToken { duration_ms: 500, pitch: PitchClass::A, sharp: false, octave: 4, dotted: false };
    /// assert_eq!(a4.frequency().unwrap(), Some(440));
    /// ```
    pub fn frequency(&self) -> Result<Option<u16>, RtttlError> {
        if self.is_rest() {
            return Ok(None);
        }
        note_frequency(self.octave, self.chromatic_position()).map(Some)
    }
}

/// Result of asking the parser for the next note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedNote {
    Note(NoteToken),
    EndOfSong,
}

/// A completely decoded song
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub name: String,
    pub defaults: Defaults,
    pub notes: Vec<NoteToken>,
}

impl Song {
    /// Sum of every note and rest length.
    pub fn total_duration_ms(&self) -> u64 {
        self.notes.iter().map(|n| u64::from(n.duration_ms)).sum()
    }
}
