//! Note frequency table
//!
//! Four octaves (4 through 7) of equal-tempered pitches rounded to whole hertz, indexed by
//! octave and 1-based chromatic position.

use crate::error::RtttlError;

/// Lowest octave with a row in the table.
pub const MIN_OCTAVE: u8 = 4;
/// Highest octave with a row in the table.
pub const MAX_OCTAVE: u8 = 7;

const SEMITONES: usize = 12;

#[rustfmt::skip]
const NOTE_FREQUENCIES: [u16; 48] = [
    // C     C#    D     D#    E     F     F#    G     G#    A     A#    B
    262,  277,  294,  311,  330,  349,  370,  392,  415,  440,  466,  494,  // 4
    523,  554,  587,  622,  659,  698,  740,  784,  831,  880,  932,  988,  // 5
    1047, 1109, 1175, 1245, 1319, 1397, 1480, 1568, 1661, 1760, 1865, 1976, // 6
    2093, 2217, 2349, 2489, 2637, 2794, 2960, 3136, 3322, 3520, 3729, 3951, // 7
];

/// Look up the frequency of a chromatic position within an octave.
///
/// Position 13 (a sharped B) continues into the next octave's C.
///
/// # Errors
/// - [`RtttlError::UnsupportedOctave`] when `octave` has no row in the table
/// - [`RtttlError::UnsupportedPitch`] when `position` is outside 1..=13 or falls past the
///   last entry
pub fn note_frequency(octave: u8, position: u8) -> Result<u16, RtttlError> {
    if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
        return Err(RtttlError::UnsupportedOctave { octave });
    }
    let unsupported = RtttlError::UnsupportedPitch { octave, position };
    if position == 0 || usize::from(position) > SEMITONES + 1 {
        return Err(unsupported);
    }

    let row = usize::from(octave - MIN_OCTAVE);
    let index = row * SEMITONES + usize::from(position) - 1;
    NOTE_FREQUENCIES.get(index).copied().ok_or(unsupported)
}
