//! # Parser Module
//!
//! Decodes RTTTL notation: `<name>:<header>:<note>,<note>,...`.
//!
//! ## Header
//! Comma-separated, each field optional, in this order:
//! - `d=<int>` default duration denominator, used only if > 0
//! - `o=<int>` default octave, used only if in 3..=7
//! - `b=<int>` beats per minute, zero is rejected with [`RtttlError::InvalidBpm`]
//!
//! ## Notes
//! `[<duration>]<letter>[#][.][<octave>]`, where the letter is one of `c d e f g a b` or `p`
//! for a rest. A dot written after the octave (`e6.`) is accepted too.
//!
//! ## Fallback Rules
//! Apart from a zero tempo the parser never fails. Every missing or malformed field falls
//! back to a default:
//!
//! | Input                          | Result                               |
//! |--------------------------------|--------------------------------------|
//! | no `:` after the name          | no notes, header defaults            |
//! | `d=0` or `d=` without digits   | default duration stays 4             |
//! | `o=` outside 3..=7             | default octave stays 6               |
//! | note duration missing or `0`   | header default duration              |
//! | unknown note letter            | rest                                 |
//! | whitespace where a note starts | rest (it is an unknown letter)       |
//! | sharped rest `p#`              | C (the sharp moves position 0 to 1)  |
//! | note octave missing            | header default octave                |
//!
//! Octaves that the frequency table cannot play are not a parse concern; they are reported
//! by [`check_playable`] and by the player when a song is loaded.
//!
//! ## Example
//! ```rust
//! use rtttl::{parse, PitchClass};
//!
//! let song = parse("test:d=4,o=5,b=100:c,8d#,2e.").unwrap();
//! assert_eq!(song.name, "test");
//! assert_eq!(song.defaults.whole_note_ms, 1200);
//! assert_eq!(song.notes.len(), 3);
//! assert_eq!(song.notes[1].pitch, PitchClass::D);
//! assert_eq!(song.notes[2].duration_ms, 900);
//! ```

use log::debug;

use crate::ast::{Defaults, NoteToken, ParsedNote, PitchClass, Song, HEADER_OCTAVE_RANGE};
use crate::error::RtttlError;
use crate::lexer::Cursor;

/// Parse a header, leaving the cursor on the first note.
///
/// The cursor never moves past the `:` that closes the header.
pub fn parse_header(cursor: &mut Cursor) -> Result<Defaults, RtttlError> {
    let defaults = Defaults::default();
    let mut default_duration = defaults.default_duration;
    let mut default_octave = defaults.default_octave;
    let mut beats_per_minute = defaults.beats_per_minute;

    // Song name
    cursor.skip_past(':');

    if cursor.starts_with("d=") {
        cursor.skip(2);
        if let Some(duration) = cursor.read_number().filter(|&d| d > 0) {
            default_duration = duration;
        }
        cursor.eat(',');
    }

    if cursor.starts_with("o=") {
        cursor.skip(2);
        // Exactly one character belongs to the octave, digit or not
        if let Some(octave) = cursor.advance().and_then(|c| c.to_digit(10)) {
            let octave = octave as u8;
            if HEADER_OCTAVE_RANGE.contains(&octave) {
                default_octave = octave;
            }
        }
        cursor.eat(',');
    }

    if cursor.starts_with("b=") {
        cursor.skip(2);
        beats_per_minute = cursor.read_number().unwrap_or(0);
    }

    cursor.eat(':');

    let defaults = Defaults::new(default_duration, default_octave, beats_per_minute)?;
    debug!(
        "header: d={} o={} b={} (whole note {} ms)",
        defaults.default_duration,
        defaults.default_octave,
        defaults.beats_per_minute,
        defaults.whole_note_ms
    );
    Ok(defaults)
}

/// Parse the next note token, or report the end of the song.
pub fn parse_note(cursor: &mut Cursor, defaults: &Defaults) -> ParsedNote {
    if cursor.is_at_end() {
        return ParsedNote::EndOfSong;
    }

    let denominator = cursor
        .read_number()
        .filter(|&d| d > 0)
        .unwrap_or(defaults.default_duration);
    let mut duration_ms = defaults.whole_note_ms / denominator;

    let pitch = cursor
        .advance()
        .map(PitchClass::from_letter)
        .unwrap_or(PitchClass::Rest);

    let sharp = cursor.eat('#');
    let mut dotted = cursor.eat('.');

    let octave = cursor.read_digit().unwrap_or(defaults.default_octave);

    if !dotted {
        dotted = cursor.eat('.');
    }
    if dotted {
        duration_ms += duration_ms / 2;
    }

    cursor.eat(',');

    ParsedNote::Note(NoteToken {
        duration_ms,
        pitch,
        sharp,
        octave,
        dotted,
    })
}

/// Verify that every pitched note from the cursor onward has a frequency.
///
/// The cursor itself is left untouched.
pub fn check_playable(cursor: &Cursor, defaults: &Defaults) -> Result<(), RtttlError> {
    let mut lookahead = cursor.clone();
    while let ParsedNote::Note(note) = parse_note(&mut lookahead, defaults) {
        note.frequency()?;
    }
    Ok(())
}

/// Decode a complete song.
///
/// # Errors
/// - [`RtttlError::InvalidBpm`] for `b=0`
/// - [`RtttlError::UnsupportedOctave`] / [`RtttlError::UnsupportedPitch`] when a note cannot be
///   played
pub fn parse(source: &str) -> Result<Song, RtttlError> {
    let name = source.split(':').next().unwrap_or_default().trim().to_string();

    let mut cursor = Cursor::new(source);
    let defaults = parse_header(&mut cursor)?;

    let mut notes = Vec::new();
    while let ParsedNote::Note(note) = parse_note(&mut cursor, &defaults) {
        note.frequency()?;
        notes.push(note);
    }

    Ok(Song {
        name,
        defaults,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(source: &str) -> (Defaults, Cursor) {
        let mut cursor = Cursor::new(source);
        let defaults = parse_header(&mut cursor).unwrap();
        (defaults, cursor)
    }

    fn next_note(cursor: &mut Cursor, defaults: &Defaults) -> NoteToken {
        match parse_note(cursor, defaults) {
            ParsedNote::Note(note) => note,
            ParsedNote::EndOfSong => panic!("unexpected end of song"),
        }
    }

    #[test]
    fn test_header_all_fields() {
        let (defaults, cursor) = header("test:d=8,o=5,b=100:c");
        assert_eq!(defaults.default_duration, 8);
        assert_eq!(defaults.default_octave, 5);
        assert_eq!(defaults.beats_per_minute, 100);
        assert_eq!(defaults.whole_note_ms, 1200);
        assert_eq!(cursor.peek(), Some('c'));
    }

    #[test]
    fn test_header_stops_after_closing_colon() {
        let source = "test:d=4,o=5,b=100:c,d";
        let (_, cursor) = header(source);
        assert_eq!(cursor.position(), source.find(":c").unwrap() + 1);
    }

    #[test]
    fn test_header_without_colon_keeps_defaults() {
        let (defaults, cursor) = header("just a name");
        assert_eq!(defaults, Defaults::default());
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_header_zero_duration_ignored() {
        let (defaults, _) = header("x:d=0,o=5,b=120:c");
        assert_eq!(defaults.default_duration, 4);
    }

    #[test]
    fn test_header_octave_out_of_range_ignored() {
        let (defaults, _) = header("x:d=4,o=9,b=120:c");
        assert_eq!(defaults.default_octave, 6);
        let (defaults, _) = header("x:o=3,b=120:c");
        assert_eq!(defaults.default_octave, 3);
        let (defaults, _) = header("x:o=x,b=120:c");
        assert_eq!(defaults.default_octave, 6);
        assert_eq!(defaults.beats_per_minute, 120);
    }

    #[test]
    fn test_header_default_bpm() {
        let (defaults, _) = header("x:d=4,o=5:c");
        assert_eq!(defaults.beats_per_minute, 63);
        assert_eq!(defaults.whole_note_ms, (60_000 / 63) * 2);
    }

    #[test]
    fn test_header_without_bpm_still_closes() {
        let (defaults, mut cursor) = header("x:d=8,o=5:c");
        let note = next_note(&mut cursor, &defaults);
        assert_eq!(note.pitch, PitchClass::C);
    }

    #[test]
    fn test_header_zero_bpm_fails() {
        let mut cursor = Cursor::new("x:b=0:c");
        assert!(matches!(parse_header(&mut cursor), Err(RtttlError::InvalidBpm)));

        let mut cursor = Cursor::new("x:b=:c");
        assert!(matches!(parse_header(&mut cursor), Err(RtttlError::InvalidBpm)));
    }

    #[test]
    fn test_empty_header() {
        let (defaults, mut cursor) = header("x::c");
        assert_eq!(defaults, Defaults::default());
        assert_eq!(next_note(&mut cursor, &defaults).pitch, PitchClass::C);
    }

    #[test]
    fn test_note_defaults() {
        let (defaults, mut cursor) = header("x:d=4,o=5,b=100:c");
        let note = next_note(&mut cursor, &defaults);
        assert_eq!(note.duration_ms, defaults.whole_note_ms / defaults.default_duration);
        assert_eq!(note.octave, 5);
        assert!(!note.sharp);
        assert!(!note.dotted);
        assert_eq!(parse_note(&mut cursor, &defaults), ParsedNote::EndOfSong);
    }

    #[test]
    fn test_note_explicit_fields() {
        let (defaults, mut cursor) = header("x:d=4,o=5,b=100:16g#.7,");
        let note = next_note(&mut cursor, &defaults);
        assert_eq!(note.pitch, PitchClass::G);
        assert!(note.sharp);
        assert!(note.dotted);
        assert_eq!(note.octave, 7);
        assert_eq!(note.duration_ms, 75 + 37);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_zero_duration_uses_default() {
        let (defaults, mut cursor) = header("x:d=8,o=5,b=100:0c");
        assert_eq!(next_note(&mut cursor, &defaults).duration_ms, 150);
    }

    #[test]
    fn test_dotted_duration_integer_math() {
        let (defaults, _) = header("x:d=4,o=5,b=63:c");
        for denominator in [1u32, 2, 4, 8, 16, 32] {
            let source = format!("{}c.", denominator);
            let mut cursor = Cursor::new(&source);
            let note = next_note(&mut cursor, &defaults);
            let base = defaults.whole_note_ms / denominator;
            assert_eq!(note.duration_ms, base + base / 2);
        }
    }

    #[test]
    fn test_dot_after_octave() {
        let (defaults, mut cursor) = header("x:d=4,o=5,b=100:e6.,c");
        let note = next_note(&mut cursor, &defaults);
        assert_eq!(note.octave, 6);
        assert!(note.dotted);
        assert_eq!(note.duration_ms, 450);
        assert_eq!(next_note(&mut cursor, &defaults).pitch, PitchClass::C);
    }

    #[test]
    fn test_unknown_letter_is_rest() {
        let (defaults, mut cursor) = header("x:b=100:8p,4x");
        let rest = next_note(&mut cursor, &defaults);
        assert!(rest.is_rest());
        assert_eq!(rest.duration_ms, 150);
        assert!(next_note(&mut cursor, &defaults).is_rest());
    }

    #[test]
    fn test_whitespace_is_a_rest() {
        let (defaults, mut cursor) = header("x:d=4,o=5,b=100:c, d,\n");
        assert_eq!(next_note(&mut cursor, &defaults).pitch, PitchClass::C);
        let space = next_note(&mut cursor, &defaults);
        assert!(space.is_rest());
        assert_eq!(space.duration_ms, 300);
        assert_eq!(next_note(&mut cursor, &defaults).pitch, PitchClass::D);
        assert!(next_note(&mut cursor, &defaults).is_rest());
        assert_eq!(parse_note(&mut cursor, &defaults), ParsedNote::EndOfSong);
    }

    #[test]
    fn test_whitespace_adds_to_song_length() {
        let song = parse("x:d=4,o=5,b=100:c, d").unwrap();
        assert_eq!(song.notes.len(), 3);
        assert_eq!(song.total_duration_ms(), 900);
    }

    #[test]
    fn test_sharped_rest_is_c() {
        let song = parse("x:d=4,o=5,b=100:p#").unwrap();
        let note = song.notes[0];
        assert_eq!(note.pitch, PitchClass::Rest);
        assert!(note.sharp);
        assert!(!note.is_rest());
        assert_eq!(note.frequency().unwrap(), Some(523));
    }

    #[test]
    fn test_parse_song() {
        let song = parse("test:d=4,o=5,b=100:c,8d#,2e.").unwrap();
        assert_eq!(song.name, "test");
        let durations: Vec<u32> = song.notes.iter().map(|n| n.duration_ms).collect();
        assert_eq!(durations, vec![300, 150, 900]);
        assert_eq!(song.total_duration_ms(), 1350);
    }

    #[test]
    fn test_parse_unsupported_octave() {
        assert!(matches!(
            parse("x:o=3,b=100:c"),
            Err(RtttlError::UnsupportedOctave { octave: 3 })
        ));
        assert!(matches!(
            parse("x:b=100:c8"),
            Err(RtttlError::UnsupportedOctave { octave: 8 })
        ));
        // A rest never needs a frequency
        assert!(parse("x:o=3,b=100:p").is_ok());
    }

    #[test]
    fn test_parse_unsupported_pitch() {
        assert!(matches!(
            parse("x:b=100:b#7"),
            Err(RtttlError::UnsupportedPitch { octave: 7, position: 13 })
        ));
    }

    #[test]
    fn test_check_playable_leaves_cursor() {
        let (defaults, cursor) = header("x:d=4,o=5,b=100:c,d,e");
        let before = cursor.position();
        check_playable(&cursor, &defaults).unwrap();
        assert_eq!(cursor.position(), before);
    }
}
